//! Integration tests for process-wide setup.
//!
//! Each integration test file runs in its own process, so `init` here is
//! called exactly once (through `setup`) and shared by every test below.

use std::io::Write;
use std::sync::{Arc, Once, OnceLock};
use std::thread;

use chrono::{NaiveDate, TimeZone, Utc};
use notekit_render::{
    init, is_initialized, try_state, FormatError, FrozenClock, InitError, MemoryLogger,
    ProcessState, RenderContext, RenderError, Renderer,
};
use proptest::prelude::*;
use tempfile::NamedTempFile;

static INIT: Once = Once::new();
static LOGGER: OnceLock<Arc<MemoryLogger>> = OnceLock::new();

fn setup() -> Arc<MemoryLogger> {
    let logger = LOGGER.get_or_init(|| Arc::new(MemoryLogger::new()));
    INIT.call_once(|| {
        let instant = NaiveDate::from_ymd_opt(2009, 11, 17)
            .unwrap()
            .and_hms_nano_opt(20, 34, 58, 651_387_237)
            .unwrap();
        let state = ProcessState::builder()
            .locale("en")
            .clock(Arc::new(FrozenClock::new(Utc.from_utc_datetime(&instant))))
            .logger(logger.clone())
            .build()
            .unwrap();
        init(state).unwrap();
    });
    Arc::clone(logger)
}

fn empty() -> RenderContext {
    RenderContext::new()
}

// ============================================================================
// Initialization
// ============================================================================

#[test]
fn second_init_is_rejected_and_keeps_first_state() {
    setup();
    assert!(is_initialized());

    let other = ProcessState::builder().locale("fr").build().unwrap();
    assert!(matches!(init(other), Err(InitError::AlreadyInitialized)));

    let state = try_state().unwrap();
    assert_eq!(state.locale_tag(), "en");
    let out = Renderer::new().render(r#"{{date "full"}}"#, &empty()).unwrap();
    assert_eq!(out, "Tuesday, November 17, 2009");
}

// ============================================================================
// Plain rendering
// ============================================================================

#[test]
fn renders_string_with_variables() {
    setup();
    let ctx = RenderContext::new().with("name", "Ed");
    assert_eq!(Renderer::new().render("Goodbye, {{name}}", &ctx).unwrap(), "Goodbye, Ed");
}

#[test]
fn renders_file() {
    setup();
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Hello, {{{{name}}}}").unwrap();

    let ctx = RenderContext::new().with("name", "Thom");
    let out = Renderer::new().render_file(file.path(), &ctx).unwrap();
    assert_eq!(out, "Hello, Thom\n");
}

#[test]
fn unknown_variable_renders_empty() {
    setup();
    assert_eq!(Renderer::default().render("Hi, {{unknown}}!", &empty()).unwrap(), "Hi, !");
}

#[test]
fn output_is_not_escaped() {
    setup();
    let ctx = RenderContext::new().with("name", "l'ami");
    assert_eq!(
        Renderer::new().render("Salut, {{name}}!", &ctx).unwrap(),
        "Salut, l'ami!"
    );
}

#[test]
fn unknown_helper_is_template_error() {
    setup();
    let err = Renderer::new().render(r#"{{frobnicate "x"}}"#, &empty()).unwrap_err();
    assert!(matches!(err, RenderError::Template(_)));
}

// ============================================================================
// Helpers
// ============================================================================

#[test]
fn slug_block_and_inline() {
    setup();
    let r = Renderer::new();
    assert_eq!(
        r.render("{{#slug}}This will be slugified!{{/slug}}", &empty()).unwrap(),
        "this-will-be-slugified"
    );
    assert_eq!(
        r.render(r#"{{slug "This will be slugified!"}}"#, &empty()).unwrap(),
        "this-will-be-slugified"
    );
}

#[test]
fn date_aliases() {
    setup();
    let r = Renderer::new();
    assert_eq!(r.render("{{date}}", &empty()).unwrap(), "2009-11-17");

    let cases = [
        ("short", "11/17/2009"),
        ("medium", "Nov 17, 2009"),
        ("long", "November 17, 2009"),
        ("full", "Tuesday, November 17, 2009"),
        ("year", "2009"),
        ("time", "20:34"),
        ("timestamp", "200911172034"),
        ("timestamp-unix", "1258490098"),
        ("cust:%Y-%m", "2009-11"),
    ];
    for (format, expected) in cases {
        let template = format!(r#"{{{{date "{}"}}}}"#, format);
        assert_eq!(r.render(&template, &empty()).unwrap(), expected, "format {}", format);
    }
}

#[test]
fn date_unknown_format_fails_render() {
    setup();
    let err = Renderer::new()
        .render(r#"{{date "bogus"}}"#, &empty())
        .unwrap_err();
    assert!(matches!(
        err,
        RenderError::DateFormat(FormatError::Unknown(ref f)) if f == "bogus"
    ));
}

#[cfg(unix)]
#[test]
fn shell_block_and_inline() {
    setup();
    let r = Renderer::new();
    assert_eq!(
        r.render(r#"{{#sh "tr '[a-z]' '[A-Z]'"}}Hello, world!{{/sh}}"#, &empty())
            .unwrap(),
        "HELLO, WORLD!"
    );
    assert_eq!(
        r.render(r#"{{sh "echo 'Hello, world!'"}}"#, &empty()).unwrap(),
        "Hello, world!\n"
    );
}

#[cfg(unix)]
#[test]
fn shell_failure_renders_empty_and_is_logged() {
    let logger = setup();
    let out = Renderer::new()
        .render(r#"before{{sh "exit 3"}}after"#, &empty())
        .unwrap();
    assert_eq!(out, "beforeafter");
    assert!(logger
        .messages()
        .iter()
        .any(|m| m.contains("exit 3") && m.contains("exit code 3")));
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn renders_concurrently() {
    setup();
    let template = r#"{{date "timestamp"}}-{{#slug}}{{title}}{{/slug}}"#;

    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let renderer = Renderer::new();
                let ctx = RenderContext::new().with("title", format!("Note {}", i));
                (0..25)
                    .map(|_| renderer.render(template, &ctx).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let outputs = handle.join().unwrap();
        let expected = format!("200911172034-note-{}", i);
        assert!(outputs.iter().all(|out| *out == expected));
    }
}

#[test]
fn shared_renderer_across_threads() {
    setup();
    let renderer = Arc::new(Renderer::new());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let renderer = Arc::clone(&renderer);
            thread::spawn(move || renderer.render(r#"{{date "long"}}"#, &empty()).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "November 17, 2009");
    }
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Text without template markup passes through untouched.
    #[test]
    fn literal_text_passes_through(text in "[a-zA-Z0-9 .,;:!?'\"<>&\n-]{0,64}") {
        setup();
        let out = Renderer::new().render(&text, &empty()).unwrap();
        prop_assert_eq!(out, text);
    }

    /// `{{#slug}}X{{/slug}}` and `{{slug "X"}}` agree for any literal X.
    #[test]
    fn slug_block_and_inline_agree(text in "[a-zA-Z0-9 àéîõüßÆ.,;:!?'()&/_\n-]{0,48}") {
        setup();
        let r = Renderer::new();
        let block = r.render(&format!("{{{{#slug}}}}{}{{{{/slug}}}}", text), &empty()).unwrap();
        let inline = r.render(&format!("{{{{slug \"{}\"}}}}", text), &empty()).unwrap();
        prop_assert_eq!(block, inline);
    }
}
