use std::io::Write;

use chrono::Local;
use env_logger::Builder;
use log::LevelFilter;

/// Console logging with a timestamped line format. Defaults to Info;
/// `RUST_LOG` overrides the filter. Safe to call more than once.
pub fn init() {
    let mut builder = Builder::new();
    builder
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(LevelFilter::Info);

    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    let _ = builder.try_init();
}
