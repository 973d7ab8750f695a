use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crop_cli::config::AppConfig;
use crop_cli::pipeline::{ConsolidateOptions, ConsolidationResult, consolidate, validate_file};
use crop_inference::InferenceEngine;
use crop_model::Environment;
use crop_validate::{ConsolidationReport, FusionSummary};

use crate::cli::{
    ConsolidateArgs, EnvironmentArgs, InfoArgs, ModelArgs, PredictArgs, RecommendArgs,
    ValidateArgs,
};
use crate::summary::{print_model_info, print_prediction, print_recommendation};

pub fn run_consolidate(args: &ConsolidateArgs, config: &AppConfig) -> Result<ConsolidationResult> {
    let options = ConsolidateOptions {
        raw_dir: args
            .raw_dir
            .clone()
            .unwrap_or_else(|| config.data.raw_dir.clone()),
        output: args
            .output
            .clone()
            .unwrap_or_else(|| config.data.consolidated_path()),
        with_features: args.with_features,
    };
    consolidate(&options)
}

pub fn run_validate(
    args: &ValidateArgs,
    config: &AppConfig,
) -> Result<(ConsolidationReport, FusionSummary)> {
    let path = args
        .file
        .clone()
        .unwrap_or_else(|| config.data.consolidated_path());
    validate_file(&path)
}

pub fn run_predict(args: &PredictArgs, config: &AppConfig) -> Result<()> {
    let engine = load_engine(&args.model, config)?;
    let query = environment(&args.environment).for_crop(args.crop.as_str());
    let output = engine
        .prediction(&query)
        .with_context(|| format!("predict yield for {}", args.crop))?;
    if args.json {
        print_json(&output)?;
    } else {
        print_prediction(&output);
    }
    Ok(())
}

pub fn run_recommend(args: &RecommendArgs, config: &AppConfig) -> Result<()> {
    let engine = load_engine(&args.model, config)?;
    let env = environment(&args.environment);
    let crops = (!args.crops.is_empty()).then_some(args.crops.as_slice());
    let output = engine
        .recommendation(&env, crops, args.top_n)
        .with_context(|| format!("recommend crops for {}", env.country))?;
    if args.json {
        print_json(&output)?;
    } else {
        print_recommendation(&output);
    }
    Ok(())
}

pub fn run_info(args: &InfoArgs, config: &AppConfig) -> Result<()> {
    let engine = load_engine(&args.model, config)?;
    let info = engine.model_info().context("read model info")?;
    print_model_info(&info);
    Ok(())
}

fn load_engine(args: &ModelArgs, config: &AppConfig) -> Result<InferenceEngine> {
    let artifact = args
        .model
        .clone()
        .unwrap_or_else(|| config.model.artifact.clone());
    let metadata = args
        .metadata
        .clone()
        .unwrap_or_else(|| config.model.metadata.clone());
    let mut engine = InferenceEngine::new(config.bounds);
    engine
        .load(&artifact, &metadata)
        .with_context(|| format!("load model {}", artifact.display()))?;
    info!(model_version = engine.model_version(), "model ready");
    Ok(engine)
}

fn environment(args: &EnvironmentArgs) -> Environment {
    Environment::new(
        args.country.as_str(),
        args.rainfall,
        args.pesticides,
        args.temp,
    )
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize response")?;
    println!("{json}");
    Ok(())
}
