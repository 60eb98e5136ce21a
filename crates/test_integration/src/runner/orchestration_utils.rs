use color_eyre::Result;
use colored::Colorize;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing_subscriber::{EnvFilter, fmt};

/// Runs every listed test against the context, then fails if any of them failed.
#[macro_export]
macro_rules! execute_suite {
    ($context:expr, [ $($test_fn:ident),* $(,)? ]) => {{
        let suite_start = std::time::Instant::now();
        let mut failed: Vec<&'static str> = Vec::new();
        let mut total = 0_usize;
        $(
            total += 1;
            if $crate::runner::orchestration_utils::run_case(stringify!($test_fn), $test_fn($context))
                .await
                .is_err()
            {
                failed.push(stringify!($test_fn));
            }
        )*
        $crate::runner::orchestration_utils::print_summary(total, &failed, suite_start.elapsed());
        if !failed.is_empty() {
            color_eyre::eyre::bail!("{} of {} tests failed: {}", failed.len(), total, failed.join(", "));
        }
    }};
}

fn rule() -> colored::ColoredString {
    "─".repeat(60).truecolor(80, 80, 80)
}

/// Runs a single test case and prints its outcome.
pub async fn run_case<Fut>(name: &str, test: Fut) -> Result<()>
where
    Fut: Future<Output = Result<()>>,
{
    println!("{}", rule());
    println!("{} {}", " RUNNING ".on_cyan().black().bold(), name.cyan().bold());

    let start_time = Instant::now();
    let result = test.await;
    let elapsed = start_time.elapsed();

    match &result {
        Ok(()) => println!(
            "{} {} ({elapsed:.2?})",
            " PASSED ".on_green().black().bold(),
            name.green()
        ),
        Err(e) => println!(
            "{} {} ({elapsed:.2?})\n\n{e:?}",
            " FAILED ".on_red().black().bold(),
            name.red()
        ),
    }
    result
}

pub fn print_summary(total: usize, failed: &[&str], elapsed: Duration) {
    let passed = total - failed.len();
    println!("{}", rule());
    let label = if failed.is_empty() {
        " SUMMARY ".on_green().black().bold()
    } else {
        " SUMMARY ".on_red().black().bold()
    };
    println!("{label} {passed}/{total} tests passed in {elapsed:.2?}.");
    for name in failed {
        println!("  {} {}", "✗".red(), name);
    }
    println!("{}", rule());
}

pub fn setup_tracing_and_panic_handling() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "info,sqlx=warn,api=debug,common_services=debug,hyper=error,reqwest=error".into()
    });

    // Only the first suite in a process installs these.
    let _ = fmt().with_env_filter(filter).compact().with_target(false).try_init();
    let _ = color_eyre::install();
}
