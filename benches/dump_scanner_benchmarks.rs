use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use parser_dump::{parse_flags, parse_players, parse_squads, parse_vehicles};
use scum_dump_scanner::{Correlation, DumpKind, DumpSet};

struct SyntheticDumps {
    players: String,
    squads: String,
    flags: String,
    vehicles: String,
}

fn steam_id(i: usize) -> String {
    format!("7656119{:010}", i)
}

/// Build dumps for `count` players, one squad per ten players,
/// two flags and a vehicle per player.
fn synthetic_dumps(count: usize) -> SyntheticDumps {
    let mut players = format!("Players online: {}\n\n", count);
    let mut squads = String::new();
    let mut flags = String::new();
    let mut vehicles = String::from("Spawned vehicles:\n");

    for i in 0..count {
        let id = steam_id(i);
        players.push_str(&format!(
            "{}. Survivor{}\nSteam: account{} ({})\nFame: {}\nAccount balance: {}\nGold balance: {}\nLocation: X={}.5 Y=-{}.25 Z=10.0\n\n",
            i + 1, i, i, id, i * 3, i as i64 - 50, i % 7, i, i
        ));
        if i % 50 == 49 {
            players.push_str(&format!("Page {}/{}\n", i / 50 + 1, count / 50 + 1));
        }

        if i % 10 == 0 {
            squads.push_str(&format!("\n[SquadId: {} SquadName: Squad {}]\n", i / 10, i / 10));
        }
        let rank = if i % 10 == 0 { 4 } else { 1 };
        squads.push_str(&format!(
            "SteamId: {} SteamName: account{} CharacterName: Survivor{} MemberRank: {}\n",
            id, i, i, rank
        ));

        for f in 0..2 {
            flags.push_str(&format!(
                "Flag ID: {} | Owner: [{}] Survivor{} ({}) | Location: X={}.0 Y={}.0 Z=1.0\n",
                i * 2 + f, id, i, i + 1, i, f
            ));
        }

        vehicles.push_str(&format!(
            "#{}: BPC_Laika 2024-05-01T12:30:00.000Z X={}.0 Y=2.0 Z=3.0 1 {} Survivor{}\n",
            i, i, id, i
        ));
    }

    SyntheticDumps { players, squads, flags, vehicles }
}

fn parser_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("dump_parsers");

    for count in [100, 1_000] {
        let dumps = synthetic_dumps(count);
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("players", count), &dumps.players, |b, text| {
            b.iter(|| black_box(parse_players(text)))
        });
        group.bench_with_input(BenchmarkId::new("squads", count), &dumps.squads, |b, text| {
            b.iter(|| black_box(parse_squads(text)))
        });
        group.bench_with_input(BenchmarkId::new("flags", count), &dumps.flags, |b, text| {
            b.iter(|| black_box(parse_flags(text)))
        });
        group.bench_with_input(BenchmarkId::new("vehicles", count), &dumps.vehicles, |b, text| {
            b.iter(|| black_box(parse_vehicles(text)))
        });
    }

    group.finish();
}

fn correlation_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation");

    for count in [100, 1_000] {
        let dumps = synthetic_dumps(count);
        let mut set = DumpSet::new();
        set.load(DumpKind::Players, &dumps.players);
        set.load(DumpKind::Squads, &dumps.squads);
        set.load(DumpKind::Flags, &dumps.flags);
        set.load(DumpKind::Vehicles, &dumps.vehicles);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("player_views", count), &set, |b, set| {
            b.iter(|| {
                let correlation = Correlation::resolve(set);
                black_box(correlation.player_views().len())
            })
        });
        group.bench_with_input(BenchmarkId::new("stats", count), &set, |b, set| {
            b.iter(|| black_box(Correlation::resolve(set).stats()))
        });
    }

    group.finish();
}

criterion_group!(benches, parser_benchmark, correlation_benchmark);
criterion_main!(benches);
