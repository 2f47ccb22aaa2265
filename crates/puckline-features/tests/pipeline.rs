//! End-to-end behaviour of the feature pipeline.

use approx::assert_relative_eq;
use polars::prelude::*;
use puckline_features::{FeatureConfig, FeaturePipeline, RestCalculator, RollingAggregator};
use puckline_traits::{Date, GameLog, PucklineError};

fn run(df: DataFrame) -> GameLog {
    FeaturePipeline::new(FeatureConfig::default())
        .unwrap()
        .run(GameLog::new(df))
        .unwrap()
}

fn ints(log: &GameLog, name: &str) -> Vec<Option<i64>> {
    log.integers(name).unwrap()
}

fn floats(log: &GameLog, name: &str) -> Vec<Option<f64>> {
    log.floats(name).unwrap()
}

/// A small two-team schedule, rows shuffled away from date order.
fn league() -> DataFrame {
    df! {
        "gameId" => &[7i64, 1, 3, 1, 5, 3, 7, 5, 9, 9, 11, 11, 13, 13],
        "team" => &["A", "A", "A", "B", "A", "B", "B", "B", "A", "B", "A", "B", "A", "B"],
        "opposingTeam" => &["B", "B", "B", "A", "B", "A", "A", "A", "B", "A", "B", "A", "B", "A"],
        "gameDate" => &[
            20240110i64, 20240101, 20240102, 20240101, 20240106, 20240102, 20240110,
            20240106, 20240111, 20240111, 20240115, 20240115, 20240118, 20240118,
        ],
        "goalsFor" => &[3.0, 2.0, 4.0, 1.0, 1.0, 0.0, 2.0, 5.0, 6.0, 2.0, 1.0, 3.0, 2.0, 2.0],
        "xGoalsFor" => &[2.1, 1.2, 3.3, 0.9, 1.4, 0.4, 2.2, 3.1, 4.0, 1.1, 0.8, 2.6, 1.9, 2.0],
        "xGoalsAgainst" => &[2.2, 0.9, 0.4, 1.2, 3.1, 3.3, 2.1, 1.4, 1.1, 4.0, 2.6, 0.8, 2.0, 1.9],
    }
    .unwrap()
}

#[test]
fn end_to_end_three_game_example() {
    let out = run(df! {
        "team" => &["A", "A", "A"],
        "opposingTeam" => &["X", "Y", "Z"],
        "gameDate" => &[20240101i64, 20240102, 20240106],
        "goalsFor" => &[2.0, 4.0, 1.0],
        "xGoalsFor" => &[1.0, 1.0, 1.0],
        "xGoalsAgainst" => &[1.0, 1.0, 1.0],
    }
    .unwrap());

    assert_eq!(ints(&out, "days_rest"), vec![Some(3), Some(0), Some(3)]);
    assert_eq!(ints(&out, "back_to_back"), vec![Some(0), Some(1), Some(0)]);
    assert_eq!(
        floats(&out, "rolling_goals_5"),
        vec![None, Some(2.0), Some(3.0)]
    );
    assert_eq!(
        floats(&out, "fatigue_adj_goals"),
        vec![None, Some(2.0 * 0.9), Some(3.0)]
    );
    // Each opponent appears once, so it has no history at all.
    assert_eq!(
        floats(&out, "opp_rolling_xg_against_5"),
        vec![None, None, None]
    );
    assert_eq!(ints(&out, "opp_days_rest"), vec![Some(3), Some(3), Some(3)]);
}

#[test]
fn preserves_rows_and_passthrough_columns() {
    let input = league();
    let out = run(input.clone());

    assert_eq!(out.len(), input.height());
    let original = GameLog::new(input);
    assert_eq!(out.integers("gameId").unwrap(), original.integers("gameId").unwrap());
    assert_eq!(out.strings("team").unwrap(), original.strings("team").unwrap());
    assert_eq!(out.columns().len(), 7 + 9);
}

#[test]
fn first_game_rest_is_default_and_back_to_back_tracks_zero_rest() {
    let out = run(league());
    let teams = out.strings("team").unwrap();
    let dates = out.game_dates().unwrap();
    let rest = ints(&out, "days_rest");
    let b2b = ints(&out, "back_to_back");

    for team in ["A", "B"] {
        let first = (0..out.len())
            .filter(|&i| teams[i].as_deref() == Some(team))
            .min_by_key(|&i| dates[i])
            .unwrap();
        assert_eq!(rest[first], Some(3), "team {team}");
    }
    for i in 0..out.len() {
        assert_eq!(b2b[i] == Some(1), rest[i] == Some(0), "row {i}");
    }
}

#[test]
fn rolling_window_switches_from_expanding_at_five_prior_games() {
    let out = run(league());
    let teams = out.strings("team").unwrap();
    let dates = out.game_dates().unwrap();
    let goals = floats(&out, "goalsFor");
    let rolling = floats(&out, "rolling_goals_5");

    let mut rows: Vec<usize> = (0..out.len())
        .filter(|&i| teams[i].as_deref() == Some("A"))
        .collect();
    rows.sort_by_key(|&i| dates[i]);
    let history: Vec<f64> = rows.iter().map(|&i| goals[i].unwrap()).collect();

    assert!(rolling[rows[0]].is_none());
    for (k, &row) in rows.iter().enumerate().skip(1) {
        let prior = &history[k.saturating_sub(5)..k];
        let expected = prior.iter().sum::<f64>() / prior.len() as f64;
        assert_relative_eq!(rolling[row].unwrap(), expected, epsilon = 1e-12);
    }
    // A has seven games; the last one uses a true five-game window.
    assert_eq!(rows.len(), 7);
}

#[test]
fn current_game_does_not_leak_into_its_own_rolling_value() {
    let base = league();
    let reference = floats(&run(base.clone()), "rolling_goals_5");

    let mut goals: Vec<f64> = GameLog::new(base.clone())
        .floats("goalsFor")
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    for row in 0..goals.len() {
        let saved = goals[row];
        goals[row] = 99.0;
        let mut changed = base.clone();
        changed
            .with_column(Series::new("goalsFor".into(), goals.clone()))
            .unwrap();
        let rolling = floats(&run(changed), "rolling_goals_5");
        assert_eq!(rolling[row], reference[row], "row {row}");
        goals[row] = saved;
    }
}

#[test]
fn fatigue_adjustment_matches_rolling_times_penalty() {
    let out = run(league());
    let b2b = ints(&out, "back_to_back");
    let penalty = floats(&out, "fatigue_penalty");

    for (rolling, adjusted) in [
        ("rolling_goals_5", "fatigue_adj_goals"),
        ("rolling_xg_5", "fatigue_adj_xg"),
    ] {
        let rolling = floats(&out, rolling);
        let adjusted = floats(&out, adjusted);
        for i in 0..out.len() {
            let factor = if b2b[i] == Some(1) { 0.9 } else { 1.0 };
            assert_relative_eq!(penalty[i].unwrap(), factor);
            match rolling[i] {
                Some(r) => assert_relative_eq!(adjusted[i].unwrap(), r * factor),
                None => assert!(adjusted[i].is_none()),
            }
        }
    }
}

#[test]
fn opponent_columns_equal_independent_opponent_timeline() {
    let out = run(league());
    let opponents = out.strings("opposingTeam").unwrap();
    let dates = out.game_dates().unwrap();
    let xga = floats(&out, "xGoalsAgainst");
    let opp_rolling = floats(&out, "opp_rolling_xg_against_5");
    let opp_rest = ints(&out, "opp_days_rest");

    for opponent in ["A", "B"] {
        let mut rows: Vec<usize> = (0..out.len())
            .filter(|&i| opponents[i].as_deref() == Some(opponent))
            .collect();
        rows.sort_by_key(|&i| dates[i]);

        let timeline_dates: Vec<Date> = rows.iter().map(|&i| dates[i].unwrap()).collect();
        let timeline_xga: Vec<Option<f64>> = rows.iter().map(|&i| xga[i]).collect();

        let expected_rest = RestCalculator::default().days_rest(&timeline_dates);
        let expected_rolling = RollingAggregator::default().aggregate(&timeline_xga);

        for (k, &row) in rows.iter().enumerate() {
            assert_eq!(opp_rest[row], Some(expected_rest[k]));
            assert_eq!(opp_rolling[row], expected_rolling[k]);
        }
    }
}

#[test]
fn identical_results_for_shuffled_input() {
    let input = league();
    let out = run(input.clone());

    let out_rev = run(input.reverse());

    let n = out.len();
    for name in ["rolling_goals_5", "rolling_xg_5", "opp_rolling_xg_against_5"] {
        let a = floats(&out, name);
        let mut b = floats(&out_rev, name);
        b.reverse();
        assert_eq!(a, b, "{name}");
    }
    for name in ["days_rest", "opp_days_rest"] {
        let a = ints(&out, name);
        let mut b = ints(&out_rev, name);
        b.reverse();
        assert_eq!(a.len(), n);
        assert_eq!(a, b, "{name}");
    }
}

#[test]
fn same_day_games_for_one_team_abort_the_run() {
    let df = df! {
        "team" => &["A", "A"],
        "opposingTeam" => &["B", "C"],
        "gameDate" => &[20240101i64, 20240101],
        "goalsFor" => &[1.0, 2.0],
        "xGoalsFor" => &[1.0, 2.0],
        "xGoalsAgainst" => &[1.0, 2.0],
    }
    .unwrap();

    let result = FeaturePipeline::new(FeatureConfig::default())
        .unwrap()
        .run(GameLog::new(df));
    assert!(matches!(result, Err(PucklineError::Ordering { ref entity, .. }) if entity == "A"));
}

#[test]
fn malformed_date_aborts_the_run() {
    let df = df! {
        "team" => &["A", "B"],
        "opposingTeam" => &["B", "A"],
        "gameDate" => &["2024-01-01", "not a date"],
        "goalsFor" => &[1.0, 2.0],
        "xGoalsFor" => &[1.0, 2.0],
        "xGoalsAgainst" => &[1.0, 2.0],
    }
    .unwrap();

    let result = FeaturePipeline::new(FeatureConfig::default())
        .unwrap()
        .run(GameLog::new(df));
    match result {
        Err(PucklineError::Ordering { entity, reason }) => {
            assert_eq!(entity, "B");
            assert!(reason.contains("row 1"));
        }
        other => panic!("expected ordering error, got {other:?}"),
    }
}

#[test]
fn wider_window_renames_columns() {
    let config = FeatureConfig {
        window: 3,
        ..Default::default()
    };
    let out = FeaturePipeline::new(config)
        .unwrap()
        .run(GameLog::new(league()))
        .unwrap();
    assert!(out.has_column("rolling_goals_3"));
    assert!(out.has_column("opp_rolling_xg_against_3"));
    assert!(!out.has_column("rolling_goals_5"));
}
