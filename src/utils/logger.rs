use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_DIRECTIVES: &str = "docx_invoice=info";
const VERBOSE_DIRECTIVES: &str = "docx_invoice=debug,info";

/// `RUST_LOG` wins over the built-in directives when it is set.
fn env_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
}

/// Compact single-line output for terminal use. `--verbose` adds the
/// generator's debug lines (asset URLs, storage paths).
pub fn init_cli_logger(verbose: bool) {
    let directives = if verbose {
        VERBOSE_DIRECTIVES
    } else {
        DEFAULT_DIRECTIVES
    };

    tracing_subscriber::registry()
        .with(env_filter(directives))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();
}

/// One JSON object per line, no timestamps: the log collector stamps
/// each record itself.
pub fn init_lambda_logger() {
    tracing_subscriber::registry()
        .with(env_filter(DEFAULT_DIRECTIVES))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .json(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_directives_parse() {
        for directives in [DEFAULT_DIRECTIVES, VERBOSE_DIRECTIVES] {
            assert!(EnvFilter::try_new(directives).is_ok(), "{}", directives);
        }
    }
}
