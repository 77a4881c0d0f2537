//! Property tests for card and effect invariants.

use proptest::prelude::*;
use terra_core::*;

fn resource() -> impl Strategy<Value = Resource> {
    prop::sample::select(Resource::ALL.to_vec())
}

fn resources(max: usize) -> impl Strategy<Value = Vec<Resource>> {
    prop::collection::vec(resource(), 0..max)
}

fn effect() -> impl Strategy<Value = Effect> {
    let leaf = prop_oneof![
        (resources(4), resources(3), 0u32..3)
            .prop_map(|(from, to, pollution)| Effect::fixed(&from, &to, pollution)),
        (0usize..4, resources(3), 0u32..3)
            .prop_map(|(from, to, pollution)| Effect::arbitrary(from, &to, pollution)),
        Just(Effect::Assistance),
    ];
    leaf.prop_recursive(2, 8, 3, |inner| {
        prop::collection::vec(inner, 0..3).prop_map(Effect::Or)
    })
}

proptest! {
    #[test]
    fn prop_activity_tracks_pollution(
        capacity in 0u32..6,
        placements in prop::collection::vec(0u32..4, 0..8),
    ) {
        let mut card = Card::new(CardId(1), capacity);
        prop_assert_eq!(card.is_active(), 0 < capacity);

        for amount in placements {
            let before = card.pollution_count();
            let fits = card.can_place_pollution(amount);
            let placed = card.place_pollution(amount);

            prop_assert_eq!(placed.is_ok(), fits);
            if fits {
                prop_assert_eq!(card.pollution_count(), before + amount);
            } else {
                prop_assert_eq!(card.pollution_count(), before);
            }
            prop_assert!(card.pollution_count() <= capacity);
            prop_assert_eq!(card.is_active(), card.pollution_count() < capacity);
        }
    }

    #[test]
    fn prop_can_get_resources_is_sub_multiset(
        held in resources(8),
        wanted in resources(6),
    ) {
        let mut card = Card::new(CardId(1), 1).with_resources(&held);
        let hand = ResourceHand::from_resources(&held);
        let want = ResourceHand::from_resources(&wanted);
        let expected = Resource::ALL.iter().all(|&r| want.get(r) <= hand.get(r));

        prop_assert_eq!(card.can_get_resources(&wanted), expected);

        let before = card.clone();
        let taken = card.get_resources(&wanted);
        prop_assert_eq!(taken.is_ok(), expected);
        if expected {
            prop_assert_eq!(card.resources().total(), hand.total() - want.total());
            // The same request can only be met again if it was held twice over
            let held_twice = Resource::ALL.iter().all(|&r| 2 * want.get(r) <= hand.get(r));
            prop_assert_eq!(card.can_get_resources(&wanted), held_twice);
            if !wanted.is_empty() && want == hand {
                prop_assert!(!card.can_get_resources(&wanted));
            }
        } else {
            prop_assert_eq!(&card, &before);
        }
    }

    #[test]
    fn prop_or_is_disjunction(
        first in effect(),
        second in effect(),
        input in resources(4),
        output in resources(3),
        pollution in 0u32..3,
    ) {
        let either = Effect::Or(vec![first.clone(), second.clone()]);
        prop_assert_eq!(
            either.check(&input, &output, pollution),
            first.check(&input, &output, pollution) || second.check(&input, &output, pollution)
        );
        prop_assert!(!Effect::Or(Vec::new()).check(&input, &output, pollution));
    }

    #[test]
    fn prop_rejected_action_leaves_grid_unchanged(
        held in resources(4),
        paid in resources(4),
        gained in resources(2),
        pollution in prop::collection::vec(0u32..2, 0..3),
    ) {
        let origin = GridPosition::origin();
        let neighbour = GridPosition::new(1, 0);
        let acting = Card::new(CardId(1), 2)
            .with_resources(&held)
            .with_upper_effect(Effect::arbitrary(paid.len(), &gained, pollution.len() as u32));
        let mut grid = Grid::new();
        grid.insert_card(origin, acting);
        grid.insert_card(neighbour, Card::new(CardId(2), 1));

        let inputs: Vec<_> = paid.iter().map(|&r| (r, origin)).collect();
        let outputs: Vec<_> = gained.iter().map(|&r| (r, origin)).collect();
        let targets: Vec<_> = pollution
            .iter()
            .map(|&p| if p == 0 { origin } else { neighbour })
            .collect();

        let before = grid.clone();
        let result = ProcessAction::new().activate_card(origin, &mut grid, &inputs, &outputs, &targets);
        if let Err(err) = result {
            prop_assert!(err.is_rejection());
            prop_assert_eq!(&grid, &before);
        }
    }
}
