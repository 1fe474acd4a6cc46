use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sift_engine::models::document::RawDocument;
use sift_engine::oracle::{ClaudeOracle, Oracle, OracleConfig};
use sift_engine::{Config, Pipeline};

/// Thin CLI collaborator around the engine: reads an already-decoded
/// plain-text résumé, runs the pipeline, and prints the JSON result.
/// PDF/DOCX decoding and OCR belong to the upload collaborator, not here.
#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let target = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{target}={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting Sift engine v{}", env!("CARGO_PKG_VERSION"));

    let mut args = std::env::args().skip(1);
    let resume_path = match args.next() {
        Some(path) => path,
        None => bail!("usage: sift <resume.txt> [job-description.txt]"),
    };
    let jd_path = args.next();

    let oracle: Option<Arc<dyn Oracle>> = match &config.anthropic_api_key {
        Some(api_key) => {
            let oracle_config = OracleConfig {
                models: config.oracle_models.clone(),
                ..Default::default()
            };
            info!("Oracle enabled (models: {})", config.oracle_models.join(", "));
            Some(Arc::new(ClaudeOracle::new(api_key.clone(), oracle_config)?))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set — running heuristic-only");
            None
        }
    };
    let pipeline = Pipeline::new(oracle, config.merge_strictness);

    let text = std::fs::read_to_string(&resume_path)
        .with_context(|| format!("failed to read resume file '{resume_path}'"))?;
    let document = RawDocument::from_text(&resume_path, text);
    info!(
        "Loaded {} ({} bytes, document {})",
        document.file_name, document.file_size_bytes, document.id
    );

    let outcome = pipeline.extract(&document.text).await?;
    info!(
        "Extraction complete: method={:?}, completeness={:.2}",
        outcome.metadata.method, outcome.metadata.completeness_score
    );
    for entry in &outcome.profile.experience {
        info!(
            "experience: {} at {}",
            entry.position_display(),
            entry.company_display()
        );
    }
    for entry in &outcome.profile.education {
        info!(
            "education: {} from {}",
            entry.degree_display(),
            entry.institution_display()
        );
    }

    let analysis = pipeline.score(&outcome.profile).await;
    info!("Overall score: {}/100", analysis.overall_score);

    let mut report = serde_json::json!({
        "profile": outcome.profile,
        "metadata": outcome.metadata,
        "analysis": analysis,
    });

    if let Some(jd_path) = jd_path {
        let jd_text = std::fs::read_to_string(&jd_path)
            .with_context(|| format!("failed to read job description '{jd_path}'"))?;
        let match_result = pipeline.match_job(&outcome.profile, &jd_text).await;
        info!("Job match: {}%", match_result.match_percentage);
        report["job_match"] = serde_json::to_value(&match_result)?;
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
