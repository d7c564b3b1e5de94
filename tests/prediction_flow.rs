/// End-to-end tests for match state -> win probability
///
/// Run with: cargo test --test prediction_flow -- --nocapture

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use ipl_win_predictor::{
    City, FeatureRecord, LogisticPipeline, MatchState, PredictError, Team, ValidationError,
    WinPredictor, WinPredictorService,
};

/// Fixed-output predictor that counts calls and records the last record.
struct FakePredictor {
    result: Result<(f64, f64), String>,
    calls: AtomicUsize,
    last: Mutex<Option<FeatureRecord>>,
}

impl FakePredictor {
    fn new(result: Result<(f64, f64), String>) -> Arc<Self> {
        Arc::new(Self {
            result,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }
}

impl WinPredictor for FakePredictor {
    fn predict_probability(&self, rec: &FeatureRecord) -> anyhow::Result<(f64, f64)> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(rec.clone());
        self.result.clone().map_err(anyhow::Error::msg)
    }

    fn name(&self) -> &str {
        "fake"
    }
}

fn bundled_model() -> LogisticPipeline {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/models/ipl_win_predictor.json");
    LogisticPipeline::load(path).expect("bundled artifact should load")
}

#[test]
fn test_reference_match_with_fake_model() {
    println!("\n=== Test: Reference Match With Fake Model ===");
    let fake = FakePredictor::new(Ok((0.3, 0.7)));
    let service = WinPredictorService::new(fake.clone());

    let out = service.predict(&MatchState::default()).unwrap();
    assert_eq!(out.batting_team, Team::MumbaiIndians);
    assert_eq!(out.batting_win_pct, 70);
    assert_eq!(out.bowling_team, Team::ChennaiSuperKings);
    assert_eq!(out.bowling_win_pct, 30);
    assert_eq!(fake.calls.load(Ordering::SeqCst), 1);

    let rec = fake.last.lock().unwrap().clone().expect("model saw a record");
    assert_eq!(rec.runs_left, 100);
    assert_eq!(rec.balls_left, 90);
    assert_eq!(rec.wickets, 8);
    assert_eq!(rec.city, City::Mumbai);
    assert!((rec.crr - 10.0).abs() < 1e-12);
    assert!((rec.rrr - 6.6667).abs() < 1e-3);

    println!("✓ {}", out);
}

#[test]
fn test_validation_short_circuits_model() {
    println!("\n=== Test: Validation Short-Circuits Model ===");
    let fake = FakePredictor::new(Ok((0.5, 0.5)));
    let service = WinPredictorService::new(fake.clone());

    let cases = [
        (
            MatchState {
                overs_completed: 0.0,
                ..MatchState::default()
            },
            ValidationError::ZeroOvers,
        ),
        (
            MatchState {
                wickets_fallen: 11,
                ..MatchState::default()
            },
            ValidationError::NegativeWickets,
        ),
        (
            MatchState {
                current_score: 150,
                overs_completed: 20.0,
                ..MatchState::default()
            },
            ValidationError::NoBallsRemaining,
        ),
        (
            MatchState {
                bowling_team: Team::MumbaiIndians,
                ..MatchState::default()
            },
            ValidationError::SameTeam,
        ),
    ];

    for (state, expected) in cases {
        match service.predict(&state) {
            Err(PredictError::Validation(e)) => assert_eq!(e, expected),
            other => panic!("expected {:?}, got {:?}", expected, other),
        }
    }
    assert_eq!(fake.calls.load(Ordering::SeqCst), 0, "model must not be called");
    println!("✓ All validation failures rejected before inference");
}

#[test]
fn test_model_failure_is_reported() {
    println!("\n=== Test: Model Failure Is Reported ===");
    let fake = FakePredictor::new(Err("bad feature schema".to_string()));
    let service = WinPredictorService::new(fake);

    let err = service.predict(&MatchState::default()).unwrap_err();
    assert!(!err.is_validation());
    assert_eq!(err.to_string(), "prediction failed: bad feature schema");
    println!("✓ {}", err);
}

#[test]
fn test_bundled_artifact_end_to_end() {
    println!("\n=== Test: Bundled Artifact End-to-End ===");
    let service = WinPredictorService::new(Arc::new(bundled_model()));

    let out = service.warmup().unwrap();
    assert_eq!(out.batting_win_pct + out.bowling_win_pct, 100);
    assert_eq!(out.batting_win_pct, 60);
    println!("✓ {}", out);

    // Fewer runs needed from the same position should help the chase.
    let easier = service
        .predict(&MatchState {
            current_score: 120,
            ..MatchState::default()
        })
        .unwrap();
    assert!(easier.batting_win_pct > out.batting_win_pct);

    // So should more wickets in hand.
    let collapse = service
        .predict(&MatchState {
            wickets_fallen: 7,
            ..MatchState::default()
        })
        .unwrap();
    assert!(collapse.batting_win_pct < out.batting_win_pct);
}

#[test]
fn test_bundled_artifact_covers_roster() {
    println!("\n=== Test: Bundled Artifact Covers Roster ===");
    let model = bundled_model();
    let mut n = 0;
    for &city in City::ALL {
        for &batting in Team::ALL {
            for &bowling in Team::ALL {
                if batting == bowling {
                    continue;
                }
                let rec = ipl_win_predictor::derive_features(&MatchState {
                    batting_team: batting,
                    bowling_team: bowling,
                    city,
                    ..MatchState::default()
                })
                .unwrap();
                let (loss, win) = model.predict_probability(&rec).unwrap();
                assert!((loss + win - 1.0).abs() < 1e-9);
                n += 1;
            }
        }
    }
    assert_eq!(n, 31 * 8 * 7);
    println!("✓ {} team/city combinations scored", n);
}
