//! Format layer construction

use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::registry::LookupSpan;

use crate::config::{DisplayConfig, Format};

/// Boxed layer so every format and time toggle shares one subscriber type.
pub(super) type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync + 'static>;

/// Build the formatting layer for `format` with the display toggles applied.
pub(super) fn fmt_layer<S>(
    format: Format,
    display: &DisplayConfig,
    writer: BoxMakeWriter,
) -> BoxedLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let base = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(display.colors)
        .with_target(display.target)
        .with_file(display.source)
        .with_line_number(display.source)
        .with_thread_ids(display.thread_ids)
        .with_thread_names(display.thread_names);

    match (format, display.time) {
        (Format::Pretty, true) => base.pretty().boxed(),
        (Format::Pretty, false) => base.pretty().without_time().boxed(),
        (Format::Compact, true) => base.compact().boxed(),
        (Format::Compact, false) => base.compact().without_time().boxed(),
        (Format::Json, time) => {
            let json = base
                .json()
                .with_current_span(true)
                .with_span_list(display.span_list)
                .flatten_event(display.flatten);
            if time {
                json.boxed()
            } else {
                json.without_time().boxed()
            }
        }
    }
}
