use std::collections::HashMap;

use crate::model::{RankedTeam, SkillsEntry, SkillsRanking, TeamNumber};

/// Rank teams by combined skills score.
///
/// A team's total is the sum of the highscores of all its entries. Teams with equal totals
/// keep the order in which they first appear in `entries`.
pub fn rank_skills<'a>(entries: impl IntoIterator<Item = &'a SkillsEntry>) -> SkillsRanking {
    let mut positions: HashMap<TeamNumber, usize> = HashMap::new();
    let mut ranking: SkillsRanking = Vec::new();

    for entry in entries {
        match positions.get(&entry.team) {
            Some(&index) => {
                let ranked = &mut ranking[index];
                ranked.total_score += entry.highscore;
                if ranked.country.is_empty() {
                    ranked.country.clone_from(&entry.country);
                }
            }
            None => {
                positions.insert(entry.team.clone(), ranking.len());
                ranking.push(RankedTeam {
                    team: entry.team.clone(),
                    country: entry.country.clone(),
                    total_score: entry.highscore,
                });
            }
        }
    }

    // `sort_by` is stable, which gives the first-seen tie-break
    ranking.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    ranking
}

/// Rank only the entries of teams from `country`.
pub fn rank_skills_for_country(entries: &[SkillsEntry], country: &str) -> SkillsRanking {
    rank_skills(entries.iter().filter(|entry| entry.country == country))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(team: &str, country: &str, highscore: u32) -> SkillsEntry {
        SkillsEntry::new(TeamNumber::parse(team).unwrap(), country, highscore)
    }

    fn teams(ranking: &SkillsRanking) -> Vec<&str> {
        ranking.iter().map(|r| r.team.as_str()).collect()
    }

    #[test]
    fn test_sums_run_types() {
        let entries = vec![
            entry("1A", "", 40),
            entry("2B", "", 70),
            entry("1A", "", 45),
            entry("3C", "", 10),
        ];
        let ranking = rank_skills(&entries);
        assert_eq!(teams(&ranking), vec!["1A", "2B", "3C"]);
        assert_eq!(ranking[0].total_score, 85);
        assert_eq!(ranking[1].total_score, 70);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let entries = vec![
            entry("ZETA", "", 50),
            entry("ALPHA", "", 20),
            entry("MID", "", 60),
            entry("ALPHA", "", 30),
        ];
        let ranking = rank_skills(&entries);
        assert_eq!(teams(&ranking), vec!["MID", "ZETA", "ALPHA"]);
    }

    #[test]
    fn test_team_numbers_merge_case_insensitively() {
        let entries = vec![entry("ucf", "", 10), entry("UCF", "", 15)];
        let ranking = rank_skills(&entries);
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].total_score, 25);
    }

    #[test]
    fn test_country_filter() {
        let entries = vec![
            entry("UCF", "United States", 100),
            entry("QUEEN", "Canada", 200),
            entry("WPI1", "United States", 150),
        ];
        let ranking = rank_skills_for_country(&entries, "United States");
        assert_eq!(teams(&ranking), vec!["WPI1", "UCF"]);
        assert!(ranking.iter().all(|r| r.country == "United States"));
    }

    #[test]
    fn test_empty_input() {
        assert!(rank_skills(&Vec::<SkillsEntry>::new()).is_empty());
    }
}
