// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tracing::subscriber::DefaultGuard;
use tracing_core::LevelFilter;
use tracing_subscriber::{Layer, layer::SubscriberExt, registry::LookupSpan,
                         util::SubscriberInitExt};

use super::{DisplayPreference, TracingConfig, rolling_file_appender_impl};

pub type DynLayer<S> = dyn Layer<S> + Send + Sync + 'static;

/// Avoid gnarly type annotations by using a macro to create the `fmt` layer.
macro_rules! create_fmt {
    () => {
        tracing_subscriber::fmt::layer()
            .compact()
            .without_time()
            .with_thread_ids(true)
            .with_thread_names(false)
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
    };
}

/// Simply initialize the tracing system with the provided [`TracingConfig`]. This
/// installs a global default subscriber, and can only be done once per process.
///
/// # Errors
///
/// Returns an error if the log file can't be created, or a global subscriber was
/// already installed.
pub fn init(tracing_config: TracingConfig) -> miette::Result<()> {
    let layers = try_create_layers(&tracing_config)?;
    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|error| miette::miette!("Could not install tracing subscriber: {error}"))
}

/// Install the subscriber for the current thread only. Logging reverts to the previous
/// subscriber when the returned guard is dropped. Useful in tests.
///
/// # Errors
///
/// Returns an error if the log file can't be created.
pub fn install_thread_local(tracing_config: TracingConfig) -> miette::Result<DefaultGuard> {
    let layers = try_create_layers(&tracing_config)?;
    Ok(tracing_subscriber::registry().with(layers).set_default())
}

/// Returns the layers. This does not initialize the tracing system. Returns `None` if
/// [`crate::log::WriterConfig::None`] is used.
///
/// # Errors
///
/// Returns an error if the log file can't be created.
pub fn try_create_layers(
    tracing_config: &TracingConfig,
) -> miette::Result<Option<Vec<Box<DynLayer<tracing_subscriber::Registry>>>>> {
    let maybe_display = tracing_config.maybe_display_preference();
    let maybe_file_path = tracing_config.maybe_file_path();

    if maybe_display.is_none() && maybe_file_path.is_none() {
        return Ok(None);
    }

    let level_filter = tracing_config.level_filter;
    let mut return_it: Vec<Box<DynLayer<tracing_subscriber::Registry>>> = vec![];

    // Set the level filter from the tracing configuration. This is needed if you add
    // more layers which don't have a level filter.
    return_it.push(Box::new(level_filter));

    if let Some(preferred_display) = maybe_display {
        return_it.push(create_display_layer(level_filter, preferred_display));
    }

    if let Some(file_path) = maybe_file_path {
        return_it.push(try_create_file_layer(level_filter, file_path)?);
    }

    Ok(Some(return_it))
}

/// This erases the concrete type of the writer, and returns a boxed layer. There's
/// more info in the docs
/// [here](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/layer/index.html#runtime-configuration-with-layers).
fn create_display_layer<S>(
    level_filter: LevelFilter,
    preferred_display: DisplayPreference,
) -> Box<DynLayer<S>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    let fmt_layer = create_fmt!().with_ansi(true);
    match preferred_display {
        DisplayPreference::Stdout => Box::new(
            fmt_layer
                .with_writer(std::io::stdout)
                .with_filter(level_filter),
        ),
        DisplayPreference::Stderr => Box::new(
            fmt_layer
                .with_writer(std::io::stderr)
                .with_filter(level_filter),
        ),
    }
}

fn try_create_file_layer<S>(
    level_filter: LevelFilter,
    tracing_log_file_path_and_prefix: &str,
) -> miette::Result<Box<DynLayer<S>>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    let file = rolling_file_appender_impl::try_create(tracing_log_file_path_and_prefix)?;
    Ok(Box::new(
        create_fmt!()
            .with_ansi(false)
            .with_writer(file)
            .with_filter(level_filter),
    ))
}
