use match_logic::{
    payoff, replay_match, run_match, ArenaError, Decide, Entry, MatchContext, MatchResult, Move,
    Player, Roster, SeededRng, Side, Strategy, Tournament,
};
use proptest::prelude::*;

// Classic roster at 200 rounds: Alex, Bob, Clara, Denis, Emma, Frida, George.
// Denis plays GrimTrigger, so his row and column match Clara's.
const EXPECTED_SCORES: [[u64; 7]; 7] = [
    [200, 1000, 204, 204, 960, 204, 208],
    [0, 600, 600, 600, 570, 600, 600],
    [199, 600, 600, 600, 588, 600, 600],
    [199, 600, 600, 600, 588, 600, 600],
    [10, 620, 593, 593, 580, 71, 132],
    [199, 600, 600, 600, 921, 600, 600],
    [198, 600, 600, 600, 882, 600, 600],
];

const EXPECTED_STREAKS: [[u32; 7]; 7] = [
    [0, 200, 1, 1, 19, 1, 2],
    [200, 0, 0, 0, 1, 0, 0],
    [1, 0, 0, 0, 1, 0, 0],
    [1, 0, 0, 0, 1, 0, 0],
    [19, 1, 1, 1, 0, 19, 19],
    [1, 0, 0, 0, 19, 0, 0],
    [2, 0, 0, 0, 19, 0, 0],
];

fn strategy_from_index(i: usize) -> Strategy {
    let catalog = Strategy::catalog();
    catalog[i % catalog.len()]
}

#[test]
fn test_reference_tournament_matrices() {
    let result = Tournament::new(Roster::reference(), 200).run().unwrap();

    assert_eq!(result.names.len(), 7);
    for i in 0..7 {
        for j in 0..7 {
            assert_eq!(
                result.scores.get(i, j),
                EXPECTED_SCORES[i][j],
                "score {} vs {}",
                result.names[i],
                result.names[j]
            );
            assert_eq!(
                result.streaks.get(i, j),
                EXPECTED_STREAKS[i][j],
                "streak {} vs {}",
                result.names[i],
                result.names[j]
            );
        }
    }
}

#[test]
fn test_opponent_scores_mirror_transposed_cells() {
    // Every strategy here is deterministic, so cell (i, j) seen from the
    // column side equals cell (j, i) seen from the row side
    let result = Tournament::new(Roster::reference(), 200).run().unwrap();
    for i in 0..7 {
        for j in 0..7 {
            assert_eq!(result.opponent_scores.get(i, j), result.scores.get(j, i));
        }
    }
}

#[test]
fn test_score_matrix_is_not_symmetric() {
    let result = Tournament::new(Roster::reference(), 200).run().unwrap();
    assert_ne!(result.scores.get(0, 1), result.scores.get(1, 0));
}

#[test]
fn test_tournament_is_deterministic() {
    let roster = Roster::from_strategies(
        Strategy::catalog()
            .into_iter()
            .map(|s| (s.kind().to_string(), s)),
    )
    .unwrap();
    let tournament = Tournament::new(roster, 150).seed(99);

    let first = tournament.run().unwrap();
    let second = tournament.run().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_parallel_matches_sequential() {
    let roster = Roster::from_strategies(
        Strategy::catalog()
            .into_iter()
            .map(|s| (s.kind().to_string(), s)),
    )
    .unwrap();
    let tournament = Tournament::new(roster, 120).seed(5);

    let parallel = tournament.clone().parallel(true).run().unwrap();
    let sequential = tournament.parallel(false).run().unwrap();
    assert_eq!(parallel, sequential);
}

#[test]
fn test_zero_rounds_everywhere() {
    let result = Tournament::new(Roster::reference(), 0).run().unwrap();
    for i in 0..7 {
        for j in 0..7 {
            assert_eq!(result.scores.get(i, j), 0);
            assert_eq!(result.opponent_scores.get(i, j), 0);
            assert_eq!(result.streaks.get(i, j), 0);
        }
    }
}

#[test]
fn test_cooperators_self_play_has_no_streak() {
    let result = Tournament::new(Roster::reference(), 200).run().unwrap();
    // Bob, Clara, Denis, Frida, George never defect against themselves
    for i in [1, 2, 3, 5, 6] {
        assert_eq!(result.streaks.get(i, i), 0);
        assert_eq!(result.scores.get(i, i), 600);
    }
}

struct Faulty;

impl Decide for Faulty {
    fn decide(&self, round: u32, _: &[Move], _: &[Move], _: &mut SeededRng) -> Move {
        if round == 5 {
            panic!("faulty strategy gave up");
        }
        Move::Defect
    }
}

#[test]
fn test_faulty_strategy_aborts_run() {
    let roster = Roster::new(vec![
        Entry::new("Bob", Strategy::AlwaysCooperate),
        Entry::new("Faulty", Faulty),
    ])
    .unwrap();

    let err = Tournament::new(roster, 10).parallel(false).run().unwrap_err();
    match err {
        ArenaError::StrategyPanicked {
            strategy,
            round,
            row,
            column,
            message,
        } => {
            assert_eq!(strategy, "Faulty");
            assert_eq!(round, 5);
            // Row-major order reaches (Bob, Faulty) first
            assert_eq!(row, "Bob");
            assert_eq!(column, "Faulty");
            assert_eq!(message, "faulty strategy gave up");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

proptest! {
    #[test]
    fn prop_round_totals_follow_payoff(
        a in 0usize..12,
        b in 0usize..12,
        rounds in 0u32..120,
        seed in any::<u64>(),
    ) {
        let sa = strategy_from_index(a);
        let sb = strategy_from_index(b);
        let ctx = MatchContext { seed, ..Default::default() };
        let (pa, pb) = (Player::new("a", &sa), Player::new("b", &sb));
        let replay = replay_match(pa, pb, rounds, &ctx).unwrap();

        prop_assert_eq!(replay.rounds.len(), rounds as usize);
        let mut row_sum = 0u64;
        let mut column_sum = 0u64;
        for r in &replay.rounds {
            prop_assert_eq!((r.row_score, r.column_score), payoff(r.row_move, r.column_move));
            prop_assert!(matches!(r.row_score + r.column_score, 2 | 5 | 6));
            row_sum += r.row_score as u64;
            column_sum += r.column_score as u64;
        }
        prop_assert_eq!(replay.result.row_score, row_sum);
        prop_assert_eq!(replay.result.column_score, column_sum);
    }

    #[test]
    fn prop_streak_bounded_by_dominant_rounds(
        a in 0usize..12,
        b in 0usize..12,
        rounds in 0u32..120,
    ) {
        let sa = strategy_from_index(a);
        let sb = strategy_from_index(b);
        let ctx = MatchContext::default();
        let (pa, pb) = (Player::new("a", &sa), Player::new("b", &sb));
        let replay = replay_match(pa, pb, rounds, &ctx).unwrap();

        let dominant = replay
            .rounds
            .iter()
            .filter(|r| matches!((r.row_score, r.column_score), (5, 0) | (0, 5)))
            .count() as u32;
        prop_assert!(replay.result.longest_dominance_streak <= dominant);
        prop_assert!(replay.result.longest_dominance_streak <= rounds);
        let observed = replay.rounds.iter().map(|r| r.streak).max().unwrap_or(0);
        prop_assert_eq!(replay.result.longest_dominance_streak, observed);

        let per_side = replay.result.longest_row_streak.max(replay.result.longest_column_streak);
        prop_assert_eq!(per_side, replay.result.longest_dominance_streak);
        let row_owned = replay
            .rounds
            .iter()
            .filter(|r| r.streak_owner == Some(Side::Row))
            .map(|r| r.streak)
            .max()
            .unwrap_or(0);
        prop_assert_eq!(replay.result.longest_row_streak, row_owned);
    }

    #[test]
    fn prop_run_and_replay_agree(
        a in 0usize..12,
        b in 0usize..12,
        rounds in 0u32..80,
        seed in any::<u64>(),
    ) {
        let sa = strategy_from_index(a);
        let sb = strategy_from_index(b);
        let ctx = MatchContext { seed, cell: 4, ..Default::default() };
        let (pa, pb) = (Player::new("a", &sa), Player::new("b", &sb));
        let run: MatchResult = run_match(pa, pb, rounds, &ctx).unwrap();
        let replay = replay_match(pa, pb, rounds, &ctx).unwrap();
        prop_assert_eq!(run, replay.result);
    }

    #[test]
    fn prop_matrix_shape(n in 1usize..9, rounds in 0u32..30) {
        let roster = Roster::from_strategies(
            (0..n).map(|i| (format!("s{i}"), strategy_from_index(i))),
        ).unwrap();
        let result = Tournament::new(roster, rounds).run().unwrap();
        prop_assert_eq!(result.scores.size(), n);
        prop_assert_eq!(result.streaks.size(), n);
        prop_assert_eq!(result.scores.rows().count(), n);
        prop_assert!(result.scores.rows().all(|r| r.len() == n));
    }
}
