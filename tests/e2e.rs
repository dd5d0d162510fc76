//! End-to-end tests against a real TeX installation, dvisvgm and inkscape.
//!
//! Gated behind the `E2E_ENABLED` environment variable so they do not run in
//! CI unless explicitly requested. Inkscape 1.x users also set
//! `TEXBOT_INKSCAPE_CLI=modern`.
//!
//! Run with:
//!   E2E_ENABLED=1 cargo test --test e2e -- --nocapture

use texbot::{
    extract, render, render_blocking, ErrorKind, InkscapeCli, RenderConfig, RenderRequest,
};

/// Skip this test unless E2E_ENABLED is set.
macro_rules! e2e_skip_unless_enabled {
    () => {{
        if std::env::var("E2E_ENABLED").is_err() {
            println!("SKIP — set E2E_ENABLED=1 to run e2e tests");
            return;
        }
    }};
}

fn e2e_config() -> RenderConfig {
    let cli = match std::env::var("TEXBOT_INKSCAPE_CLI").as_deref() {
        Ok("modern") => InkscapeCli::Modern,
        _ => InkscapeCli::Legacy,
    };
    RenderConfig::builder()
        .inkscape_cli(cli)
        .build()
        .expect("config")
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("texbot=debug")),
        )
        .with_test_writer()
        .try_init();
}

#[test]
fn renders_fraction_at_requested_height() {
    e2e_skip_unless_enabled!();
    init_tracing();

    let req = extract(r"$$ \frac{a}{b} + \sqrt{2} $$[3]")
        .expect("extract")
        .expect("match");
    let image = render_blocking(&req, &e2e_config()).expect("render");

    assert_eq!(image.height(), 150);
    assert!(image.width() > 0);
    assert!(image.as_bytes().starts_with(b"\x89PNG"));
}

#[test]
fn renders_siunitx_and_matrices() {
    e2e_skip_unless_enabled!();
    init_tracing();

    let req = RenderRequest::new(
        r"\SI{9.81}{\metre\per\second\squared} \quad \begin{pmatrix} 1 & 0 \\ 0 & 1 \end{pmatrix}",
        4,
    )
    .unwrap();
    let image = render_blocking(&req, &e2e_config()).expect("render");
    assert_eq!(image.height(), 200);
}

#[test]
fn undefined_macro_yields_diagnostic() {
    e2e_skip_unless_enabled!();
    init_tracing();

    let req = RenderRequest::new(r"\notamacro{x}", 4).unwrap();
    let err = render_blocking(&req, &e2e_config()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Typeset);
    let diag = err.diagnostic().expect("typeset errors carry a diagnostic");
    println!("diagnostic: {diag}");
    assert!(diag.contains("Undefined control sequence"), "got: {diag}");
}

#[tokio::test]
async fn async_render_matches_blocking() {
    e2e_skip_unless_enabled!();
    init_tracing();

    let config = e2e_config();
    let req = RenderRequest::new("x^2", 2).unwrap();
    let a = render(req.clone(), &config).await.expect("async render");
    let b = render_blocking(&req, &config).expect("blocking render");
    assert_eq!((a.width(), a.height()), (b.width(), b.height()));
}
