use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Context;
use tracker_core::{update, AppState, AppViewModel, Msg, SearchId};
use tracker_engine::EngineHandle;
use tracker_logging::{tracker_debug, tracker_warn, LogSink};

use super::config::{resolve_config, NavLinks};
use super::console;
use super::effects::{EffectRunner, Notifier, StderrNotifier};
use super::ui;
use crate::cli::{CliArgs, OutputFormat};

pub fn run_app(args: CliArgs) -> anyhow::Result<()> {
    let level = args.log_level();
    if let Err(err) = tracker_logging::init(&args.log.sinks(), level) {
        eprintln!("Cannot open log file ({err}); logging to the terminal only");
        let _ = tracker_logging::init(&[LogSink::Stderr], level);
    }

    let mut config = resolve_config(args.config.as_deref())?;
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if args.print_config {
        let ron = config.to_ron()?;
        return write_output(args.output.as_deref(), &format!("{ron}\n"));
    }

    let engine = EngineHandle::new(config.api_settings()).context("starting request engine")?;
    let wait = config.wait_timeout();
    let mut app = App::new(engine, StderrNotifier, config.nav_links());
    app.start(wait);

    if args.interactive {
        let stdin = io::stdin();
        let stdout = io::stdout();
        console::run_console(&mut app, stdin.lock(), stdout.lock(), args.format, wait)?;
        return Ok(());
    }

    run_once(&mut app, &args.select, wait);
    write_output(args.output.as_deref(), &app.render(args.format))
}

fn write_output(path: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => fs::write(path, text).with_context(|| format!("writing {}", path.display())),
        None => io::stdout()
            .write_all(text.as_bytes())
            .context("writing to stdout"),
    }
}

/// Applies a selection and asks for its resources. An empty selection
/// raises the "no searches selected" alert instead of a request.
fn run_once<N: Notifier>(app: &mut App<N>, selection: &[SearchId], wait: Duration) {
    app.dispatch(Msg::SelectionChanged(selection.to_vec()));
    app.dispatch(Msg::ShowResourcesClicked);
    app.settle(wait);
}

/// Owns the core state and drives it with messages; effects go to the engine.
pub struct App<N: Notifier> {
    state: AppState,
    runner: EffectRunner<N>,
    links: NavLinks,
}

impl<N: Notifier> App<N> {
    pub fn new(engine: EngineHandle, notifier: N, links: NavLinks) -> Self {
        Self {
            state: AppState::new(),
            runner: EffectRunner::new(engine, notifier),
            links,
        }
    }

    /// Loads the saved searches; the list is usable once this returns.
    pub fn start(&mut self, wait: Duration) -> bool {
        self.dispatch(Msg::Init);
        self.settle(wait)
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            tracker_debug!("State changed; view needs rendering");
        }
        self.state = state;
        self.runner.run(effects);
    }

    /// True while the listing or the latest resource request is outstanding.
    pub fn is_busy(&self) -> bool {
        !self.state.loader().is_settled() || self.state.fetch_pending()
    }

    /// Processes engine results until nothing is outstanding or `timeout`
    /// elapses. Returns false on timeout.
    pub fn settle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.is_busy() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.runner.next_msg(remaining) {
                Some(msg) => self.dispatch(msg),
                None => {
                    tracker_warn!("Gave up waiting for the backend after {:?}", timeout);
                    return false;
                }
            }
        }
        true
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn render(&self, format: OutputFormat) -> String {
        let view = self.view();
        match format {
            OutputFormat::Text => ui::render::render_text(&view),
            OutputFormat::Html => ui::html::render_page(&view, &self.links),
        }
    }

    #[cfg(test)]
    pub fn notifier(&self) -> &N {
        self.runner.notifier()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use clap::Parser;
    use serde_json::json;
    use tempfile::TempDir;
    use tracker_engine::ApiSettings;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub(crate) const WAIT: Duration = Duration::from_secs(5);

    impl Notifier for Vec<String> {
        fn alert(&mut self, message: &str) {
            self.push(message.to_string());
        }
    }

    pub(crate) async fn backend() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/savedsearches"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "A", "keywords": "foo bar"},
                {"id": 2, "name": "B", "keywords": ""}
            ])))
            .mount(&server)
            .await;
        server
    }

    pub(crate) fn app_for(server: &MockServer) -> App<Vec<String>> {
        let engine = EngineHandle::new(ApiSettings {
            base_url: server.uri(),
            ..ApiSettings::default()
        })
        .unwrap();
        App::new(engine, Vec::new(), NavLinks::default())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn start_loads_options_and_selection_shows_keywords() {
        let server = backend().await;
        let mut app = app_for(&server);

        assert!(app.start(WAIT));
        app.dispatch(Msg::SelectionChanged(vec![1, 2]));

        let view = app.view();
        assert_eq!(view.options.len(), 2);
        assert_eq!(view.keyword_line, "Keywords: foo, bar");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn one_shot_fetch_renders_resource_rows() {
        let server = backend().await;
        Mock::given(method("POST"))
            .and(path("/api/resources_for_searches"))
            .and(body_json(json!({"search_ids": [1, 2]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"title": "T1", "company": "C1", "location": null,
                 "work_status": "active", "url": "http://x"}
            ])))
            .expect(1)
            .mount(&server)
            .await;
        let mut app = app_for(&server);

        assert!(app.start(WAIT));
        run_once(&mut app, &[2, 1], WAIT);

        let text = app.render(OutputFormat::Text);
        assert!(text.contains("Resources (1):\nT1 | C1 | N/A | active | http://x\n"));
        assert!(app.notifier().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn empty_selection_alerts_without_request() {
        let server = backend().await;
        Mock::given(method("POST"))
            .and(path("/api/resources_for_searches"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;
        let mut app = app_for(&server);

        assert!(app.start(WAIT));
        app.dispatch(Msg::ShowResourcesClicked);

        assert!(!app.is_busy());
        assert_eq!(app.notifier(), &vec!["No searches selected.".to_string()]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn one_shot_without_selection_alerts() {
        let server = backend().await;
        Mock::given(method("POST"))
            .and(path("/api/resources_for_searches"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;
        let mut app = app_for(&server);

        assert!(app.start(WAIT));
        run_once(&mut app, &[], WAIT);

        assert_eq!(app.notifier(), &vec!["No searches selected.".to_string()]);
        assert!(app.render(OutputFormat::Text).contains("Resources: none"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn run_app_writes_rendered_page_to_output_file() {
        let server = backend().await;
        Mock::given(method("POST"))
            .and(path("/api/resources_for_searches"))
            .and(body_json(json!({"search_ids": [1]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"title": "T1", "company": "C1", "location": "Remote",
                 "work_status": null, "url": "http://x"}
            ])))
            .expect(1)
            .mount(&server)
            .await;
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("page.txt");
        let uri = server.uri();
        let args = CliArgs::try_parse_from([
            "resource_tracker",
            "--log",
            "off",
            "-u",
            uri.as_str(),
            "-s",
            "1",
            "-o",
            out.to_str().unwrap(),
        ])
        .unwrap();

        tokio::task::spawn_blocking(move || run_app(args))
            .await
            .unwrap()
            .unwrap();

        let written = fs::read_to_string(&out).unwrap();
        assert!(written.contains("Keywords: foo, bar"));
        assert!(written.contains("T1 | C1 | Remote | N/A | http://x\n"));
    }

    #[test]
    fn print_config_reflects_base_url_override() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("config.ron");
        let args = CliArgs::try_parse_from([
            "resource_tracker",
            "--log",
            "off",
            "--base-url",
            "http://override.example/",
            "--print-config",
            "-o",
            out.to_str().unwrap(),
        ])
        .unwrap();

        run_app(args).unwrap();

        let written = fs::read_to_string(&out).unwrap();
        assert!(written.contains("base_url: \"http://override.example/\""));
        assert!(written.ends_with('\n'));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn failed_fetch_keeps_previous_table() {
        let server = backend().await;
        Mock::given(method("POST"))
            .and(path("/api/resources_for_searches"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"title": "T1", "company": "C1", "url": "http://x"}
            ])))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/resources_for_searches"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let mut app = app_for(&server);

        assert!(app.start(WAIT));
        run_once(&mut app, &[1], WAIT);
        assert_eq!(app.view().table.len(), 1);

        app.dispatch(Msg::ShowResourcesClicked);
        assert!(app.settle(WAIT));

        let view = app.view();
        assert_eq!(view.table.len(), 1);
        assert_eq!(view.table[0].title, "T1");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn malformed_listing_leaves_list_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/savedsearches"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;
        let mut app = app_for(&server);

        assert!(app.start(WAIT));

        let view = app.view();
        assert_eq!(view.loader, tracker_core::LoaderState::Failed);
        assert!(view.options.is_empty());
    }
}
