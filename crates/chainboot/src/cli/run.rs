use std::process::ExitCode;

use anyhow::Context;
use chainboot::ui::ProgressBarSink;
use chainboot::{Bootstrap, BootstrapBroadcast, BootstrapConfig, BootstrapState, EventSender};
use chainboot_fetch::ReqwestClient;
use tokio::sync::broadcast::error::RecvError;

use super::app::{ConfigArg, RunArg, Source};

pub fn resolve_config(source: &Source) -> anyhow::Result<BootstrapConfig> {
    let mut config = match &source.config {
        Some(path) => BootstrapConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => BootstrapConfig::default(),
    };
    if let Some(url) = &source.url {
        config = config.with_source_url(url.clone());
    }
    if let Some(destination) = &source.destination {
        config = config.with_destination_root(destination.clone());
    }
    config.validate()?;
    Ok(config)
}

pub fn config(arg: ConfigArg) -> anyhow::Result<ExitCode> {
    let config = resolve_config(&arg.source)?;
    print!("{}", config.to_toml_string()?);
    Ok(ExitCode::SUCCESS)
}

pub async fn run(arg: RunArg) -> anyhow::Result<ExitCode> {
    let config = resolve_config(&arg.source)?;
    let client = ReqwestClient::with_timeouts(config.timeouts()).context("building HTTP client")?;
    let bootstrap = Bootstrap::new(client, &config);

    let (bootstrap, printer) = if arg.json {
        let sender = EventSender::<BootstrapBroadcast>::default();
        let mut events = sender.subscribe();
        let printer = tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => match serde_json::to_string(&event) {
                        Ok(line) => println!("{line}"),
                        Err(e) => tracing::warn!(error = %e, "failed to encode event"),
                    },
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "event printer lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
        (bootstrap.with_broadcast(sender), Some(printer))
    } else {
        (bootstrap.with_sink(ProgressBarSink::new()), None)
    };

    tracing::info!(
        url = %config.source_url,
        destination = %config.destination_root.display(),
        "starting bootstrap"
    );
    let handle = bootstrap.spawn();

    let stop = handle.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, stopping bootstrap");
            stop.cancel();
        }
    });

    let state = handle.wait().await;
    if let Some(printer) = printer {
        printer.await.context("event printer panicked")?;
    }

    Ok(match state {
        BootstrapState::Finished => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}
