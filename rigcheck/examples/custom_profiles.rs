//! Example: scoring with a custom profile next to the built-in ones.
//! Run with: cargo run --example custom_profiles [path/to/build.json]

use rigcheck::scoring::{Band, Outcome, Profile, Rule, RuleCheck, ScoringEngine};
use std::path::Path;

fn streaming_profile() -> Profile {
    Profile {
        id: "streaming".to_string(),
        name: "Streaming".to_string(),
        description: "Gaming while encoding a live stream.".to_string(),
        rules: vec![
            Rule {
                id: "cores".to_string(),
                name: "Core count".to_string(),
                enabled: true,
                check: RuleCheck::CpuCores {
                    count: Default::default(),
                    bands: vec![
                        Band {
                            min: Some(12.0),
                            max: None,
                            score: 10,
                            feedback: "{value} cores leave room for the encoder.".to_string(),
                        },
                        Band {
                            min: None,
                            max: None,
                            score: -5,
                            feedback: "Encoding will compete with the game for CPU time.".to_string(),
                        },
                    ],
                },
            },
            Rule {
                id: "graphics".to_string(),
                name: "Graphics".to_string(),
                enabled: true,
                check: RuleCheck::GraphicsOutput {
                    present: Outcome::none(),
                    missing: Outcome {
                        score: -50,
                        feedback: "A stream needs a display output.".to_string(),
                    },
                },
            },
        ],
    }
}

fn main() -> Result<(), rigcheck::RigCheckError> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/fixtures/gaming_build.json".to_string());
    let path = Path::new(&path);

    if !path.exists() {
        eprintln!("File not found: {}", path.display());
        eprintln!("Usage: cargo run --example custom_profiles [path/to/build.json]");
        std::process::exit(1);
    }

    let build = rigcheck::load_build(path)?;
    let mut engine = ScoringEngine::with_default_profiles();
    engine.add_profile(streaming_profile());

    println!("Profile scores for {}", path.display());
    for score in engine.evaluate(&build) {
        println!("  {:<28} {:>5}", score.name, score.total_score);
        for feedback in &score.feedback {
            println!("    - {}", feedback);
        }
    }
    Ok(())
}
