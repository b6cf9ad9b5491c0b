use clap::Parser;

#[derive(Parser)]
#[command(name = "cachelog")]
#[command(about = "Summarize traffic and cache behavior from request logs", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Count requests whose stdin span exceeds this as filtered instead of
    /// accepted (-1 disables filtering)
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub stdin_limit: i64,
}
