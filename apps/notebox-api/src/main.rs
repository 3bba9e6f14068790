use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = notebox_api::Args::parse();

	notebox_api::run(args).await
}
