/// Property-based tests for bracket construction and bout scoring
///
/// These tests drive brackets of arbitrary size to completion and hammer
/// match counters with arbitrary deltas.
use karate_tournament::{
    Belt, Corner, Discipline, Match, MatchRules,
    bracket::{self, BracketSeeder},
    category::{AgeRange, Category},
    entities::Sex,
};
use proptest::prelude::*;
use uuid::Uuid;

fn kumite_with(contenders: usize) -> Category {
    let mut category = Category::new(
        Discipline::Kumite,
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

// Strategy for a corner
fn corner_strategy() -> impl Strategy<Value = Corner> {
    prop_oneof![Just(Corner::Aka), Just(Corner::Shiro)]
}

proptest! {
    #[test]
    fn test_bracket_size_is_full_tree(contenders in 1usize..=64) {
        let mut category = kumite_with(contenders);
        let nodes = bracket::initialize_bracket(&mut category, &mut BracketSeeder::from_seed(0));

        let leaves = (nodes + 1) / 2;
        prop_assert!(leaves.is_power_of_two());
        prop_assert!(leaves >= contenders);
        prop_assert!(leaves / 2 < contenders);
        prop_assert_eq!(category.matches.len(), nodes);
    }

    #[test]
    fn test_every_contender_placed_once(contenders in 1usize..=40, seed in any::<u64>()) {
        let mut category = kumite_with(contenders);
        let nodes = bracket::initialize_bracket(&mut category, &mut BracketSeeder::from_seed(seed));

        let mut placed: Vec<Uuid> = category.matches[nodes / 2..]
            .iter()
            .filter_map(|leaf| leaf.aka)
            .collect();
        placed.sort();
        let mut members = category.members.clone();
        members.sort();
        prop_assert_eq!(placed, members);
    }

    #[test]
    fn test_bracket_always_completes(contenders in 1usize..=33, seed in any::<u64>()) {
        let mut category = kumite_with(contenders);
        bracket::initialize_bracket(&mut category, &mut BracketSeeder::from_seed(seed));

        let mut bouts = 0;
        while let Some(index) = bracket::next_ready_match(&category) {
            let corner = if seed % 2 == 0 { Corner::Aka } else { Corner::Shiro };
            category.matches[index].add_point(corner, 1).unwrap();
            bracket::finish_match(&mut category, index).unwrap();
            bouts += 1;
        }

        // Single elimination: everyone but the champion loses exactly once.
        prop_assert_eq!(bouts, contenders - 1);
        prop_assert!(category.finished);
        let champion = category.bracket_winner();
        prop_assert!(champion.is_some_and(|c| category.members.contains(&c)));
    }

    #[test]
    fn test_winners_take_the_parity_corner(
        contenders in 1usize..=33,
        seed in any::<u64>(),
        corners in prop::collection::vec(corner_strategy(), 32),
    ) {
        let mut category = kumite_with(contenders);
        bracket::initialize_bracket(&mut category, &mut BracketSeeder::from_seed(seed));

        let mut played = 0;
        while let Some(index) = bracket::next_ready_match(&category) {
            category.matches[index].add_point(corners[played % corners.len()], 1).unwrap();
            bracket::finish_match(&mut category, index).unwrap();
            played += 1;
        }
        prop_assert!(category.finished);

        for (index, node) in category.matches.iter().enumerate().skip(1) {
            let Some(winner) = node.winner else { continue };
            let parent = &category.matches[(index - 1) / 2];
            let seat = if index % 2 == 1 { parent.aka } else { parent.shiro };
            prop_assert_eq!(seat, Some(winner), "node {} fed the wrong corner", index);
        }
    }

    #[test]
    fn test_same_seed_same_draw(contenders in 2usize..=32, seed in any::<u64>()) {
        let mut first = kumite_with(contenders);
        let mut second = first.clone();
        bracket::initialize_bracket(&mut first, &mut BracketSeeder::from_seed(seed));
        bracket::initialize_bracket(&mut second, &mut BracketSeeder::from_seed(seed));
        prop_assert_eq!(first.matches, second.matches);
    }

    #[test]
    fn test_counters_never_negative(
        steps in prop::collection::vec((corner_strategy(), -5i32..=5), 0..50)
    ) {
        let mut bout = Match::timed(Uuid::new_v4(), MatchRules::default())
            .with_contenders(Some(Uuid::new_v4()), Some(Uuid::new_v4()));
        let mut expected_points = [0i64; 2];
        let mut expected_penalties = [0i64; 2];

        for (corner, delta) in steps {
            let slot = usize::from(corner == Corner::Shiro);
            expected_points[slot] = (expected_points[slot] + i64::from(delta)).max(0);
            expected_penalties[slot] = (expected_penalties[slot] + i64::from(delta)).max(0);

            let points = bout.add_point(corner, delta).unwrap();
            let penalty = bout.adjust_penalty(corner, delta).unwrap();
            prop_assert_eq!(i64::from(points), expected_points[slot]);
            prop_assert_eq!(i64::from(penalty), expected_penalties[slot]);
        }
    }

    #[test]
    fn test_finish_awards_higher_score(aka in 0i32..10, shiro in 0i32..10) {
        prop_assume!(aka != shiro);
        let mut bout = Match::timed(Uuid::new_v4(), MatchRules::default())
            .with_contenders(Some(Uuid::new_v4()), Some(Uuid::new_v4()));
        bout.add_point(Corner::Aka, aka).unwrap();
        bout.add_point(Corner::Shiro, shiro).unwrap();

        let winner = bout.finish().unwrap();
        let expected = if aka > shiro { bout.aka } else { bout.shiro };
        prop_assert_eq!(Some(winner), expected);
    }
}
