use crate::args::Cli;
use crate::config::BackendConfig;
use crate::output::{self, RenderContext};
use anyhow::Result;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use crashtop_client::{BacktraceClient, ClientConfig};
use crashtop_engine::{DecodeOptions, QuerySpec, build_query, compare_windows, sort_and_rank};
use crashtop_types::Error;

pub fn run(cli: Cli) -> Result<()> {
    let config = BackendConfig::from_env(cli.project.clone());
    validate(&cli, &config)?;

    // validate() guarantees a project; the token is checked there too
    // unless this is a dry run.
    let project = config.project.clone().unwrap_or_default();

    let now = Utc::now();
    let (days, start_ts) = resolve_window(&cli, now)?;
    let end_ts = now.timestamp();

    // Comparison mode over-fetches so the baseline join has coverage, then
    // truncates back to the requested limit after classification.
    let query_limit = if cli.compare.is_some() {
        (cli.limit * 3) as usize
    } else {
        cli.limit as usize
    };

    let spec = QuerySpec {
        start_ts,
        end_ts,
        limit: query_limit,
        platform: cli.platform.clone(),
        version_prefix: cli.version_prefix.clone(),
        channel: cli.channel.clone(),
    };
    let query = build_query(&spec);

    let client = BacktraceClient::new(ClientConfig {
        endpoint: config.endpoint.clone(),
        universe: config.universe.clone(),
        project: project.clone(),
        token: config.token.clone().unwrap_or_default(),
    })?;

    if cli.dry_run {
        println!("URL: POST {}", client.query_url(true));
        println!("\nQuery body:");
        println!("{}", serde_json::to_string_pretty(&query)?);

        if cli.compare.is_some() {
            let baseline_spec = QuerySpec {
                start_ts: (now - Duration::days(days * 2)).timestamp(),
                end_ts: start_ts,
                ..spec
            };
            println!("\nBaseline query body:");
            println!("{}", serde_json::to_string_pretty(&build_query(&baseline_spec))?);
        }
        return Ok(());
    }

    eprintln!(
        "Querying Backtrace for top crashers in '{}' (last {} days)...",
        project, days
    );
    let response = client.query(&query, cli.verbose)?;

    let decode_opts = DecodeOptions {
        window_days: days,
        max_frames: cli.frames as usize,
        min_count: cli.min_count as u64,
        window_start_ts: start_ts,
        now_ts: now.timestamp(),
        project: &project,
        endpoint: &config.endpoint,
    };
    let mut crashers = crashtop_engine::decode_response(&response, &decode_opts)?;

    if cli.verbose {
        eprintln!("  Parsed {} crash groups from response", crashers.len());
    }

    let compare_mode = cli.compare.is_some();
    if compare_mode {
        let baseline_start = (now - Duration::days(days * 2)).timestamp();

        eprintln!(
            "Querying baseline window ({}-{} days ago)...",
            days,
            days * 2
        );
        let baseline_spec = QuerySpec {
            start_ts: baseline_start,
            end_ts: start_ts,
            limit: query_limit,
            platform: cli.platform.clone(),
            version_prefix: cli.version_prefix.clone(),
            channel: cli.channel.clone(),
        };
        let baseline_response = client.query(&build_query(&baseline_spec), cli.verbose)?;

        let baseline_opts = DecodeOptions {
            min_count: 0,
            window_start_ts: baseline_start,
            ..decode_opts
        };
        let baseline = crashtop_engine::decode_response(&baseline_response, &baseline_opts)?;

        if cli.verbose {
            eprintln!("  Parsed {} baseline crash groups", baseline.len());
        }

        crashers = compare_windows(crashers, &baseline, cli.limit as usize);
    } else {
        crashers = sort_and_rank(crashers, cli.order.into(), cli.new_only);
    }

    if crashers.is_empty() {
        return Err(Error::EmptyResult.into());
    }

    eprintln!("Found {} crash groups.", crashers.len());

    let ctx = RenderContext {
        lookback_days: days,
        generated_utc: now,
        compare_mode,
    };
    println!("{}", output::render(&crashers, cli.format, &ctx)?);

    Ok(())
}

fn validate(cli: &Cli, config: &BackendConfig) -> Result<(), Error> {
    if config.token.is_none() && !cli.dry_run {
        return Err(Error::Validation(
            "BACKTRACE_API_KEY environment variable is required. Create a token with \
             query:post capability in Backtrace project settings."
                .to_string(),
        ));
    }

    if config.project.is_none() {
        return Err(Error::Validation(
            "--project is required (or set BACKTRACE_PROJECT env var).".to_string(),
        ));
    }

    if cli.limit < 1 || cli.limit > 500 {
        return Err(Error::Validation(
            "--limit must be between 1 and 500.".to_string(),
        ));
    }

    if cli.min_count < 0 {
        return Err(Error::Validation(
            "--min-count must be non-negative.".to_string(),
        ));
    }

    if cli.frames < 1 {
        return Err(Error::Validation(
            "--frames must be at least 1.".to_string(),
        ));
    }

    if let Some(compare) = cli.compare
        && compare < 1
    {
        return Err(Error::Validation(
            "--compare must be at least 1 day.".to_string(),
        ));
    }

    Ok(())
}

/// Resolve the lookback window: `--since` wins, then `--compare`, then
/// `--days`. Returns the window length in days and its start timestamp.
fn resolve_window(cli: &Cli, now: DateTime<Utc>) -> Result<(i64, i64), Error> {
    if let Some(since) = &cli.since {
        let date = NaiveDate::parse_from_str(since, "%Y-%m-%d")
            .map_err(|_| Error::Validation("--since must be in YYYY-MM-DD format.".to_string()))?;
        let since_dt = Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap_or_default());
        let days = (now - since_dt).num_days().max(1);
        Ok((days, since_dt.timestamp()))
    } else if let Some(compare) = cli.compare {
        Ok((compare, (now - Duration::days(compare)).timestamp()))
    } else {
        Ok((cli.days, (now - Duration::days(cli.days)).timestamp()))
    }
}
