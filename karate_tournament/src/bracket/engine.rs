//! Single-elimination tree over a category's contenders.
//!
//! The tree is a flat array with the final at index 0 and the children of
//! node `i` at `2i + 1` (feeds Aka) and `2i + 2` (feeds Shiro). Leaves hold
//! one drawn contender each and resolve as byes straight away, so the first
//! real bouts happen one level up.

use log::{debug, info, warn};

use super::{
    errors::{BracketError, BracketResult},
    seeding::BracketSeeder,
};
use crate::{
    bout::{Corner, Match, MatchPhase},
    category::Category,
    entities::EntrantId,
};

/// Leaves needed for `contenders` entrants: the next power of two, at least 1
#[must_use]
pub fn leaf_count(contenders: usize) -> usize {
    contenders.max(1).next_power_of_two()
}

/// Total node count of a bracket for `contenders` entrants
#[must_use]
pub fn bracket_size(contenders: usize) -> usize {
    2 * leaf_count(contenders) - 1
}

#[must_use]
pub fn parent_index(index: usize) -> Option<usize> {
    (index > 0).then(|| (index - 1) / 2)
}

/// Leaves occupy the upper half of the array.
#[must_use]
pub fn is_leaf(index: usize, total: usize) -> bool {
    index >= total / 2
}

/// Build a fresh bracket for `category`, replacing any previous one.
///
/// Contenders are drawn with `seeder`; leaves left empty are structural
/// byes. Returns the number of nodes.
pub fn initialize_bracket(category: &mut Category, seeder: &mut BracketSeeder) -> usize {
    let contenders = category.contenders();
    let leaves = leaf_count(contenders.len());
    let total = 2 * leaves - 1;
    let rules = category.match_rules().cloned();

    category.matches = (0..total)
        .map(|_| {
            let id = seeder.next_match_id();
            match &rules {
                Some(rules) => Match::timed(id, rules.clone()),
                None => Match::standard(id),
            }
        })
        .collect();
    category.results.clear();
    category.finished = false;

    let first_leaf = leaves - 1;
    for (offset, contender) in seeder.shuffle(&contenders).into_iter().enumerate() {
        category.matches[first_leaf + offset].aka = Some(contender);
    }

    info!(
        "Bracket for {} built: {} contenders, {total} nodes",
        category.name,
        contenders.len()
    );

    for index in first_leaf..total {
        let leaf = &mut category.matches[index];
        if leaf.aka.is_none() && leaf.shiro.is_none() {
            continue;
        }
        let resolved = match leaf.resolve_bye() {
            Ok(_) => promote_winner(category, index),
            Err(e) => Err(e.into()),
        };
        if let Err(e) = resolved {
            warn!("Bye at node {index} of {} not resolved: {e}", category.name);
        }
    }

    total
}

/// Seat the winner of node `index` in its parent and resolve any byes that
/// creates on the way up. Promoting the final finishes the category.
pub fn promote_winner(category: &mut Category, index: usize) -> BracketResult<()> {
    let size = category.matches.len();
    let mut index = index;

    loop {
        let node = category
            .matches
            .get(index)
            .ok_or(BracketError::IndexOutOfRange { index, size })?;
        let winner = node.winner.ok_or(BracketError::NoWinner(index))?;

        let Some(parent) = parent_index(index) else {
            category.finished = true;
            info!("Category {} finished, won by {winner}", category.name);
            return Ok(());
        };

        let parent_match = &mut category.matches[parent];
        if parent_match.finished {
            return Err(BracketError::ParentFinished(parent));
        }
        // Odd children feed Aka.
        if index % 2 == 1 {
            parent_match.aka = Some(winner);
        } else {
            parent_match.shiro = Some(winner);
        }
        debug!("{winner} advances from node {index} to node {parent}");

        if !try_resolve_bye(category, parent)? {
            return Ok(());
        }
        index = parent;
    }
}

/// Finish node `index` as a bye when it holds one contender and the
/// subtree feeding its empty corner can never produce another.
fn try_resolve_bye(category: &mut Category, index: usize) -> BracketResult<bool> {
    let node = &category.matches[index];
    if node.finished {
        return Ok(false);
    }
    let feeder = match (node.aka, node.shiro) {
        (Some(_), None) => 2 * index + 2,
        (None, Some(_)) => 2 * index + 1,
        _ => return Ok(false),
    };
    if subtree_has_contender(&category.matches, feeder) {
        return Ok(false);
    }

    category.matches[index].resolve_bye()?;
    debug!("Node {index} of {} resolved as a bye", category.name);
    Ok(true)
}

fn subtree_has_contender(matches: &[Match], index: usize) -> bool {
    let Some(node) = matches.get(index) else {
        return false;
    };
    if node.aka.is_some() || node.shiro.is_some() {
        return true;
    }
    !is_leaf(index, matches.len())
        && (subtree_has_contender(matches, 2 * index + 1)
            || subtree_has_contender(matches, 2 * index + 2))
}

/// Next bout to fight: the deepest unfinished node with both corners
/// filled, so earlier rounds come first and the final comes last.
#[must_use]
pub fn next_ready_match(category: &Category) -> Option<usize> {
    category
        .matches
        .iter()
        .enumerate()
        .rev()
        .find(|(_, m)| matches!(m.phase(), MatchPhase::Ready | MatchPhase::Overtime))
        .map(|(index, _)| index)
}

fn node_mut(category: &mut Category, index: usize) -> BracketResult<&mut Match> {
    let size = category.matches.len();
    category
        .matches
        .get_mut(index)
        .ok_or(BracketError::IndexOutOfRange { index, size })
}

/// Close node `index` on the scoreboard and advance its winner.
pub fn finish_match(category: &mut Category, index: usize) -> BracketResult<EntrantId> {
    let winner = node_mut(category, index)?.finish()?;
    promote_winner(category, index)?;
    Ok(winner)
}

/// Apply an externally decided winner to node `index` and advance it.
pub fn resolve_match(
    category: &mut Category,
    index: usize,
    winner: EntrantId,
) -> BracketResult<EntrantId> {
    let node = node_mut(category, index)?;
    let corner = node
        .corner_of(winner)
        .ok_or(BracketError::NotAContender(winner))?;
    node.decide(corner)?;
    promote_winner(category, index)?;
    Ok(winner)
}

/// Disqualify `corner` of node `index`; the opponent advances.
pub fn disqualify(
    category: &mut Category,
    index: usize,
    corner: Corner,
) -> BracketResult<EntrantId> {
    let winner = node_mut(category, index)?.disqualify(corner)?;
    promote_winner(category, index)?;
    Ok(winner)
}

/// Write back a match that was run elsewhere (e.g. by a live actor),
/// promoting its winner when it finished.
pub fn record_match(category: &mut Category, index: usize, updated: Match) -> BracketResult<()> {
    let node = node_mut(category, index)?;
    if node.id != updated.id {
        return Err(BracketError::MatchIdMismatch {
            index,
            expected: node.id,
            found: updated.id,
        });
    }
    let finished = updated.finished && !node.finished;
    *node = updated;
    if finished {
        promote_winner(category, index)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bout::{DecidedBy, MatchError, MatchRules},
        category::AgeRange,
        entities::{Belt, Discipline, Sex},
    };
    use uuid::Uuid;

    fn category_with(discipline: Discipline, contenders: usize) -> Category {
        let mut category = Category::new(
            discipline,
            Sex::Male,
            AgeRange::exact(12),
            Belt::all(),
            &MatchRules::default(),
        );
        for _ in 0..contenders {
            category.add_member(Uuid::new_v4());
        }
        category
    }

    #[test]
    fn test_sizes() {
        assert_eq!(leaf_count(0), 1);
        assert_eq!(leaf_count(1), 1);
        assert_eq!(leaf_count(5), 8);
        assert_eq!(bracket_size(8), 15);
        assert_eq!(bracket_size(9), 31);
        assert_eq!(parent_index(0), None);
        assert_eq!(parent_index(5), Some(2));
        assert_eq!(parent_index(6), Some(2));
    }

    #[test]
    fn test_empty_category_builds_trivial_bracket() {
        let mut category = category_with(Discipline::Kumite, 0);
        assert_eq!(initialize_bracket(&mut category, &mut BracketSeeder::from_seed(1)), 1);
        assert!(!category.finished);
        assert_eq!(category.matches[0].aka, None);
        assert_eq!(next_ready_match(&category), None);
    }

    #[test]
    fn test_single_contender_wins_by_bye() {
        let mut category = category_with(Discipline::Kumite, 1);
        initialize_bracket(&mut category, &mut BracketSeeder::from_seed(1));
        assert!(category.finished);
        assert_eq!(category.bracket_winner(), Some(category.members[0]));
        assert_eq!(category.matches[0].decided_by, Some(DecidedBy::Bye));
    }

    #[test]
    fn test_four_contenders_meet_in_semis() {
        let mut category = category_with(Discipline::Kumite, 4);
        assert_eq!(initialize_bracket(&mut category, &mut BracketSeeder::from_seed(3)), 7);

        // Leaves 3..=6 resolved and promoted into the semi-finals.
        for leaf in 3..7 {
            assert!(category.matches[leaf].finished);
        }
        for semi in 1..3 {
            assert_eq!(category.matches[semi].phase(), MatchPhase::Ready);
        }
        assert_eq!(category.matches[0].phase(), MatchPhase::Pending);
        assert_eq!(next_ready_match(&category), Some(2));
        assert!(category.matches[1].is_timed());
    }

    #[test]
    fn test_three_contenders_one_advances_to_final() {
        let mut category = category_with(Discipline::Kumite, 3);
        initialize_bracket(&mut category, &mut BracketSeeder::from_seed(9));

        assert_eq!(category.matches[1].phase(), MatchPhase::Ready);
        assert!(category.matches[2].finished);
        assert_eq!(category.matches[2].decided_by, Some(DecidedBy::Bye));
        // Node 2 is even, so its winner waits in the final's Shiro corner.
        assert!(category.matches[0].shiro.is_some());
        assert!(category.matches[0].aka.is_none());
        assert!(!category.finished);
    }

    #[test]
    fn test_play_through_to_champion() {
        let mut category = category_with(Discipline::Kata, 5);
        initialize_bracket(&mut category, &mut BracketSeeder::from_seed(11));

        let mut bouts = 0;
        while let Some(index) = next_ready_match(&category) {
            category.matches[index].add_point(Corner::Aka, 1).unwrap();
            let winner = finish_match(&mut category, index).unwrap();
            assert_eq!(category.matches[index].winner, Some(winner));
            bouts += 1;
        }
        assert_eq!(bouts, 4);
        assert!(category.finished);
        assert!(category.bracket_winner().is_some());
    }

    #[test]
    fn test_tied_match_stays_for_decision() {
        let mut category = category_with(Discipline::Kata, 2);
        initialize_bracket(&mut category, &mut BracketSeeder::from_seed(5));
        assert_eq!(
            finish_match(&mut category, 0),
            Err(BracketError::Match(MatchError::Tied))
        );

        let shiro = category.matches[0].shiro.unwrap();
        assert_eq!(resolve_match(&mut category, 0, shiro), Ok(shiro));
        assert!(category.finished);
        assert_eq!(category.matches[0].decided_by, Some(DecidedBy::Decision));

        let stranger = Uuid::new_v4();
        assert_eq!(
            resolve_match(&mut category, 0, stranger),
            Err(BracketError::NotAContender(stranger))
        );
        assert_eq!(
            resolve_match(&mut category, 0, shiro),
            Err(BracketError::Match(MatchError::AlreadyFinished))
        );
    }

    #[test]
    fn test_disqualification_advances_opponent() {
        let mut category = category_with(Discipline::Kumite, 2);
        initialize_bracket(&mut category, &mut BracketSeeder::from_seed(5));
        let aka = category.matches[0].aka.unwrap();
        assert_eq!(disqualify(&mut category, 0, Corner::Shiro), Ok(aka));
        assert!(category.matches[0].disqualification);
        assert_eq!(category.bracket_winner(), Some(aka));
    }

    #[test]
    fn test_promote_errors() {
        let mut category = category_with(Discipline::Kata, 4);
        initialize_bracket(&mut category, &mut BracketSeeder::from_seed(2));
        assert_eq!(promote_winner(&mut category, 1), Err(BracketError::NoWinner(1)));
        assert_eq!(
            promote_winner(&mut category, 40),
            Err(BracketError::IndexOutOfRange { index: 40, size: 7 })
        );
    }

    #[test]
    fn test_record_match_promotes() {
        let mut category = category_with(Discipline::Kumite, 4);
        initialize_bracket(&mut category, &mut BracketSeeder::from_seed(8));

        let mut live = category.matches[1].clone();
        live.add_point(Corner::Shiro, 2).unwrap();
        let winner = live.finish().unwrap();
        record_match(&mut category, 1, live).unwrap();
        assert_eq!(category.matches[0].aka, Some(winner));

        let stranger = Match::standard(Uuid::new_v4());
        assert!(matches!(
            record_match(&mut category, 2, stranger),
            Err(BracketError::MatchIdMismatch { index: 2, .. })
        ));
    }

    #[test]
    fn test_rebuild_discards_previous_state() {
        let mut category = category_with(Discipline::Kumite, 1);
        initialize_bracket(&mut category, &mut BracketSeeder::from_seed(1));
        assert!(category.finished);
        category.add_member(Uuid::new_v4());
        initialize_bracket(&mut category, &mut BracketSeeder::from_seed(1));
        assert!(!category.finished);
        assert_eq!(category.matches.len(), 3);
    }

    #[test]
    fn test_same_seed_same_bracket() {
        let category = category_with(Discipline::Kumite, 6);
        let mut a = category.clone();
        let mut b = category;
        initialize_bracket(&mut a, &mut BracketSeeder::from_seed(77));
        initialize_bracket(&mut b, &mut BracketSeeder::from_seed(77));
        assert_eq!(a.matches, b.matches);
    }
}
