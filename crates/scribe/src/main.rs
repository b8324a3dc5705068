use std::io::{self, IsTerminal, Write};

use anyhow::{Context, Result, bail};
use clap::Parser;
use scribe::{
    cli::{Cli, Commands},
    config::Settings,
    pipeline::{self, ArticleGenerator, GenerationEvent},
    render::{SHORT_KEY_LEN, render_article, render_history},
    session::{self, SPINNER_MESSAGE, Session},
    store::{ArticleStore, SledArticleStore},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;
    tracing::debug!(?settings, "settings loaded");

    let store = SledArticleStore::open(&settings.store.path).with_context(|| {
        format!(
            "failed to open the article store at {}",
            settings.store.path.display()
        )
    })?;

    match cli.command() {
        Commands::History { limit } => {
            print!("{}", render_history(&store.history()?, limit));
        }
        Commands::Show { selector } => match pipeline::select(&store, &selector) {
            Ok(record) => print!("{}", render_article(&record)),
            Err(err) => bail!(err.user_message()),
        },
        Commands::Generate { topic, stream } => {
            let generator = generator(&settings, store)?;
            let topic = topic.join(" ");
            if stream {
                generate_streaming(&generator, &topic).await?;
            } else {
                generate(&generator, &topic).await?;
            }
            generator.store().flush()?;
        }
        Commands::Interactive => {
            let generator = generator(&settings, store)?;
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            let mut out = io::stdout();

            Session::new(&generator)
                .with_spinner(io::stderr().is_terminal())
                .run(input, &mut out)
                .await?;
            generator.store().flush()?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "scribe=debug,scribe_openai=debug,scribe_store=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn generator(
    settings: &Settings,
    store: SledArticleStore,
) -> Result<ArticleGenerator<scribe::openai::OpenAiAdapter, SledArticleStore>> {
    let backend = settings
        .openai_adapter()
        .context("set OPENAI_API_KEY or `openai.api_key` in the settings file")?;

    Ok(ArticleGenerator::new(backend, store, settings.generation()?))
}

async fn generate(
    generator: &ArticleGenerator<scribe::openai::OpenAiAdapter, SledArticleStore>,
    topic: &str,
) -> Result<()> {
    let progress = session::spinner(io::stderr().is_terminal(), SPINNER_MESSAGE);
    let result = generator.generate(topic).await;
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    match result {
        Ok(record) => {
            print!("{}", render_article(&record));
            eprintln!("saved as {}", record.short_key(SHORT_KEY_LEN));
            Ok(())
        }
        Err(err) => {
            if let Some(record) = err.unsaved_record() {
                print!("{}", render_article(record));
            }
            bail!(err.user_message())
        }
    }
}

async fn generate_streaming(
    generator: &ArticleGenerator<scribe::openai::OpenAiAdapter, SledArticleStore>,
    topic: &str,
) -> Result<()> {
    let mut stdout = io::stdout().lock();
    let mut write_err = None;

    let result = generator
        .generate_streaming(topic, |event| {
            let written = match event {
                GenerationEvent::Title(title) => write!(stdout, "## {title}\n\n"),
                GenerationEvent::Delta(delta) => write!(stdout, "{delta}"),
            };
            if let Err(err) = written.and_then(|_| stdout.flush()) {
                write_err.get_or_insert(err);
            }
        })
        .await;

    if let Some(err) = write_err {
        return Err(err).context("failed to write to stdout");
    }

    match result {
        Ok(record) => {
            writeln!(stdout)?;
            eprintln!("saved as {}", record.short_key(SHORT_KEY_LEN));
            Ok(())
        }
        Err(err) => {
            writeln!(stdout)?;
            bail!(err.user_message())
        }
    }
}
