//! `DumpAllSquadsInfoList` dump.
//!
//! ```text
//! [SquadId: 7 SquadName: Reapers]
//! SteamId: 76561198000000001 SteamName: A CharacterName: Al MemberRank: 4
//! SteamId: 76561198000000002 SteamName: B CharacterName: Bo MemberRank: 1
//! ```

use once_cell::sync::Lazy;
use regex::Captures;

use crate::grammar::{compile, group, int_or_zero, FieldRule, RecordGrammar};
use crate::models::{Member, Squad, SteamId};

static SQUAD_GRAMMAR: Lazy<RecordGrammar<Squad>> = Lazy::new(|| RecordGrammar {
    record: "squad",
    anchor: compile(r"^\[SquadId:\s*(\d+)\s*SquadName:\s*(.*?)\s*\]$"),
    start: start_squad,
    fields: vec![FieldRule::new(
        "member",
        r"^SteamId:\s*(\d+)\s*SteamName:\s*(.*?)\s*CharacterName:\s*(.*?)\s*MemberRank:\s*(\S*)$",
        push_member,
    )],
});

fn start_squad(caps: &Captures<'_>) -> Squad {
    Squad::new(int_or_zero(group(caps, 1)), group(caps, 2))
}

fn push_member(squad: &mut Squad, caps: &Captures<'_>) {
    squad.push_member(Member {
        steam_id: SteamId::new(group(caps, 1)),
        steam_name: group(caps, 2).to_string(),
        character_name: group(caps, 3).to_string(),
        rank: int_or_zero(group(caps, 4)),
    });
}

/// Parse a `DumpAllSquadsInfoList` dump into squads, in dump order
pub fn parse_squads(text: &str) -> Vec<Squad> {
    SQUAD_GRAMMAR.parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const REAPERS: &str = "[SquadId: 7 SquadName: Reapers]
SteamId: 111 SteamName: A CharacterName: Al MemberRank: 4
SteamId: 222 SteamName: B CharacterName: Bo MemberRank: 1";

    #[test]
    fn test_parse_squad_with_leader() {
        let squads = parse_squads(REAPERS);
        assert_eq!(
            squads,
            vec![Squad {
                id: 7,
                name: "Reapers".to_string(),
                leader: Some(SteamId::new("111")),
                members: vec![
                    Member {
                        steam_id: SteamId::new("111"),
                        steam_name: "A".to_string(),
                        character_name: "Al".to_string(),
                        rank: 4,
                    },
                    Member {
                        steam_id: SteamId::new("222"),
                        steam_name: "B".to_string(),
                        character_name: "Bo".to_string(),
                        rank: 1,
                    },
                ],
            }]
        );
    }

    #[test]
    fn test_squad_without_leader() {
        let text = "[SquadId: 2 SquadName: Loners]\nSteamId: 5 SteamName: x CharacterName: y MemberRank: 3";
        let squads = parse_squads(text);
        assert_eq!(squads[0].leader, None);
        assert!(squads[0].leader_member().is_none());
    }

    #[test]
    fn test_names_with_spaces() {
        let text = "[SquadId: 12 SquadName: The Night Shift ]\n\
                    SteamId: 76561198000000009 SteamName: Big Al CharacterName: Alan Smithee MemberRank: 2";
        let squad = &parse_squads(text)[0];
        assert_eq!(squad.name, "The Night Shift");
        assert_eq!(squad.members[0].steam_name, "Big Al");
        assert_eq!(squad.members[0].character_name, "Alan Smithee");
        assert_eq!(squad.members[0].rank, 2);
    }

    #[test]
    fn test_empty_squad_and_bad_rank() {
        let text = "[SquadId: 1 SquadName: Empty]\n[SquadId: 2 SquadName: Odd]\n\
                    SteamId: 9 SteamName: n CharacterName: c MemberRank: high";
        let squads = parse_squads(text);
        assert_eq!(squads.len(), 2);
        assert!(squads[0].members.is_empty());
        assert_eq!(squads[1].members[0].rank, 0);
    }

    #[test]
    fn test_members_before_any_squad_are_ignored() {
        let text = "SteamId: 9 SteamName: n CharacterName: c MemberRank: 4\n[SquadId: 3 SquadName: Late]";
        let squads = parse_squads(text);
        assert_eq!(squads.len(), 1);
        assert!(squads[0].members.is_empty());
        assert!(squads[0].leader.is_none());
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_squads("").is_empty());
    }
}
