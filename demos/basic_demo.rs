use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio_util::sync::CancellationToken;

use novelkit::{
    Clock, DistortionKind, EffectRange, GlitchController, GlyphCorruptionModifier, GlyphTransform,
    MonospaceSurface, PresentOutcome, PresenterFactory, ShakeModifier, TextPresenter,
    TextPresenterOptions, parse_ruby,
};

/// Walk through a normal line, a shaking line, a glitch burst and a ruby line.
#[derive(Parser, Debug)]
#[command(name = "basic_demo")]
struct Args {
    /// Seconds between revealed characters.
    #[arg(long, default_value_t = 0.03)]
    interval: f64,

    /// Request a skip this many seconds into each line.
    #[arg(long)]
    skip_after: Option<f64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let clock = Arc::new(Clock::new());
    let factory = PresenterFactory::new(Arc::clone(&clock));
    let presenter = factory.create(MonospaceSurface::default());
    let glitch = Arc::new(GlitchController::new(Arc::clone(&clock)));
    let base = TextPresenterOptions::default().with_character_interval(args.interval);

    show(
        &presenter,
        "Normal text is revealed one character at a time.",
        &base,
        args.skip_after,
    )
    .await?;

    let shake: Arc<dyn GlyphTransform> = Arc::new(ShakeModifier::default());
    show(
        &presenter,
        "This line <b>trembles</b> as it appears.",
        &base
            .clone()
            .with_effect_range(EffectRange::new(10, 8, [shake])),
        args.skip_after,
    )
    .await?;

    let line = "Something is wrong with this text.";
    let corrupt: Arc<dyn GlyphTransform> = Arc::new(GlyphCorruptionModifier::default());
    let glitch_options = base
        .clone()
        .with_effect_range(EffectRange::new(13, 5, [corrupt]));
    let burst = {
        let glitch = Arc::clone(&glitch);
        tokio::spawn(async move {
            let token = CancellationToken::new();
            let corrupted = glitch.corrupt(13, 17, 0.8, &token).await?;
            let distorted = glitch
                .distort(0, 8, DistortionKind::Shatter, &token)
                .await?;
            let noise = glitch.screen_noise(0.7, 0.5, &token).await;
            tracing::info!(?corrupted, ?distorted, ?noise, "glitch burst finished");
            anyhow::Ok(())
        })
    };
    show(&presenter, line, &glitch_options, args.skip_after).await?;
    glitch.stop_all();
    burst.await??;

    let ruby = parse_ruby("これは<ruby>漢字<rt>かんじ</rt></ruby>の<ruby>例<rt>れい</rt></ruby>です");
    for a in &ruby.annotations {
        tracing::info!(
            base_start = a.base_start_index,
            base_len = a.base_length,
            gloss = %a.annotation_text,
            "ruby annotation"
        );
    }
    show(
        &presenter,
        &ruby.with_parenthetical_glosses(),
        &base,
        args.skip_after,
    )
    .await?;

    Ok(())
}

async fn show(
    presenter: &TextPresenter<MonospaceSurface>,
    line: &str,
    options: &TextPresenterOptions,
    skip_after: Option<f64>,
) -> anyhow::Result<()> {
    let skipper = skip_after.map(|secs| {
        let presenter = presenter.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs_f64(secs.max(0.0))).await;
            presenter.request_skip();
        })
    });

    let outcome = presenter
        .present(line, options, &CancellationToken::new())
        .await?;
    if let Some(skipper) = skipper {
        skipper.abort();
    }

    let revealed = presenter.surface().revealed_text();
    let tag = match outcome {
        PresentOutcome::Completed => "done",
        PresentOutcome::Skipped => "skipped",
        PresentOutcome::Cancelled => "cancelled",
    };
    println!("[{tag}] {revealed}");
    Ok(())
}
