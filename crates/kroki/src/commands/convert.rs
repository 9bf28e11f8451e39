//! `kroki convert` command implementation.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use kroki_client::{KrokiClient, RenderClient, RenderedDiagram};
use kroki_config::{Config, Overrides};
use kroki_formats::{FormatResolver, FormatTables, RawRequest};

use crate::error::CliError;
use crate::input;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Diagram source file, or `-` to read from standard input.
    input: String,

    /// Diagram type, e.g. graphviz, plantuml, mermaid (default: infer from file extension).
    #[arg(short = 't', long = "type")]
    diagram_type: Option<String>,

    /// Output format: svg, png, jpeg, pdf or base64 (default: infer from output file, else svg).
    #[arg(short, long)]
    format: Option<String>,

    /// Output file (default: input path with the format extension); use - for stdout.
    #[arg(short, long)]
    out_file: Option<String>,

    /// Path to configuration file (default: auto-discover kroki.toml).
    #[arg(short, long, env = "KROKI_CONFIG")]
    config: Option<PathBuf>,
}

impl ConvertArgs {
    pub(crate) fn execute(self, tables: &FormatTables) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), Some(&Overrides::from_env()))?;
        match &config.config_path {
            Some(path) => tracing::debug!(path = %path.display(), "Loaded configuration"),
            None => tracing::debug!("No configuration file found, using defaults"),
        }

        let client = KrokiClient::new(&config.endpoint, config.timeout);
        tracing::debug!(endpoint = client.endpoint(), timeout = ?config.timeout, "Kroki service");

        self.run(&client, tables, io::stdin().lock(), &mut io::stdout().lock())
    }

    fn run(
        &self,
        client: &impl RenderClient,
        tables: &FormatTables,
        stdin: impl Read,
        stdout: &mut impl Write,
    ) -> Result<(), CliError> {
        let raw = RawRequest {
            diagram_type: self.diagram_type.as_deref().unwrap_or_default(),
            image_format: self.format.as_deref().unwrap_or_default(),
            out_file: self.out_file.as_deref().unwrap_or_default(),
            input_path: &self.input,
        };

        let request = FormatResolver::new(tables)
            .resolve_request(&raw, || input::read_source(&self.input, stdin))?;
        tracing::debug!(
            diagram_type = %request.diagram_type,
            image_format = %request.image_format,
            output = %request.output_path,
            "Resolved request"
        );

        let diagram = client.render(
            &request.source_text,
            &request.diagram_type,
            request.image_format,
        )?;

        if request.writes_to_stdout() {
            write_diagram(stdout, &diagram)?;
        } else {
            client.persist(Path::new(&request.output_path), &diagram)?;
        }
        Ok(())
    }
}

/// Write a rendered diagram to stdout, terminating text formats with a newline.
fn write_diagram(out: &mut impl Write, diagram: &RenderedDiagram) -> io::Result<()> {
    out.write_all(&diagram.bytes)?;
    if diagram.is_text() {
        out.write_all(b"\n")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use kroki_client::RenderError;
    use kroki_formats::{DiagramType, FormatError, ImageFormat};
    use pretty_assertions::assert_eq;

    use super::*;

    /// Records render calls and answers with a canned body.
    struct FakeClient {
        body: Vec<u8>,
        fail_with_status: Option<u16>,
        calls: RefCell<Vec<(String, String, ImageFormat)>>,
    }

    impl FakeClient {
        fn new(body: &[u8]) -> Self {
            Self {
                body: body.to_vec(),
                fail_with_status: None,
                calls: RefCell::new(Vec::new()),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                fail_with_status: Some(status),
                ..Self::new(b"")
            }
        }
    }

    impl RenderClient for FakeClient {
        fn render(
            &self,
            source: &str,
            diagram_type: &DiagramType,
            image_format: ImageFormat,
        ) -> Result<RenderedDiagram, RenderError> {
            self.calls.borrow_mut().push((
                source.to_owned(),
                diagram_type.to_string(),
                image_format,
            ));
            if let Some(status) = self.fail_with_status {
                return Err(RenderError::Status {
                    status,
                    body: "Syntax Error".to_owned(),
                });
            }
            Ok(RenderedDiagram {
                image_format,
                bytes: self.body.clone(),
            })
        }
    }

    fn args(input: &str) -> ConvertArgs {
        ConvertArgs {
            input: input.to_owned(),
            diagram_type: None,
            format: None,
            out_file: None,
            config: None,
        }
    }

    fn run(args: &ConvertArgs, client: &FakeClient, stdin: &[u8]) -> Result<Vec<u8>, CliError> {
        let tables = FormatTables::builtin();
        let mut stdout = Vec::new();
        args.run(client, &tables, stdin, &mut stdout)?;
        Ok(stdout)
    }

    #[test]
    fn test_convert_file_writes_next_to_input() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("hello.dot");
        std::fs::write(&input, "digraph G {Hello->World}").unwrap();
        let client = FakeClient::new(b"<svg/>");

        let stdout = run(&args(input.to_str().unwrap()), &client, b"").unwrap();

        assert!(stdout.is_empty());
        assert_eq!(
            std::fs::read(dir.path().join("hello.svg")).unwrap(),
            b"<svg/>"
        );
        assert_eq!(
            client.calls.borrow().as_slice(),
            &[(
                "digraph G {Hello->World}".to_owned(),
                "graphviz".to_owned(),
                ImageFormat::Svg
            )]
        );
    }

    #[test]
    fn test_convert_format_from_out_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("hello.puml");
        let out_file = dir.path().join("diagram.jpg");
        std::fs::write(&input, "@startuml\nA -> B\n@enduml").unwrap();
        let client = FakeClient::new(b"\xff\xd8\xff");

        let mut args = args(input.to_str().unwrap());
        args.out_file = Some(out_file.to_str().unwrap().to_owned());
        run(&args, &client, b"").unwrap();

        assert_eq!(std::fs::read(&out_file).unwrap(), b"\xff\xd8\xff");
        let calls = client.calls.borrow();
        assert_eq!(calls[0].1, "plantuml");
        assert_eq!(calls[0].2, ImageFormat::Jpeg);
    }

    #[test]
    fn test_convert_stdin_to_stdout() {
        let client = FakeClient::new(b"<svg>hi</svg>");
        let mut args = args("-");
        args.diagram_type = Some("dot".to_owned());

        let stdout = run(&args, &client, b"digraph G {A->B}").unwrap();

        assert_eq!(stdout, b"<svg>hi</svg>\n");
        assert_eq!(client.calls.borrow()[0].0, "digraph G {A->B}");
        assert_eq!(client.calls.borrow()[0].1, "graphviz");
    }

    #[test]
    fn test_convert_binary_to_stdout_is_verbatim() {
        let client = FakeClient::new(b"\x89PNG\r\n");
        let mut args = args("-");
        args.diagram_type = Some("mermaid".to_owned());
        args.format = Some("PNG".to_owned());
        args.out_file = Some("-".to_owned());

        let stdout = run(&args, &client, b"graph TD; A-->B").unwrap();

        assert_eq!(stdout, b"\x89PNG\r\n");
    }

    #[test]
    fn test_convert_file_to_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("hello.d2");
        std::fs::write(&input, "a -> b").unwrap();
        let client = FakeClient::new(b"aGVsbG8=");

        let mut args = args(input.to_str().unwrap());
        args.format = Some("base64".to_owned());
        args.out_file = Some("-".to_owned());
        let stdout = run(&args, &client, b"").unwrap();

        assert_eq!(stdout, b"aGVsbG8=\n");
        assert!(!dir.path().join("hello.base64").exists());
    }

    #[test]
    fn test_convert_stdin_requires_type() {
        let client = FakeClient::new(b"");

        let err = run(&args("-"), &client, b"digraph G {}").unwrap_err();

        assert!(
            matches!(err, CliError::Format(FormatError::MissingDiagramType)),
            "got {err:?}"
        );
        assert!(client.calls.borrow().is_empty());
    }

    #[test]
    fn test_convert_invalid_format_leaves_stdin_unread() {
        let client = FakeClient::new(b"");
        let mut args = args("-");
        args.diagram_type = Some("graphviz".to_owned());
        args.format = Some("gif".to_owned());
        let mut stdin: &[u8] = b"digraph G {A->B}";

        let tables = FormatTables::builtin();
        let err = args
            .run(&client, &tables, &mut stdin, &mut Vec::new())
            .unwrap_err();

        assert!(
            matches!(err, CliError::Format(FormatError::InvalidImageFormat(_))),
            "got {err:?}"
        );
        assert_eq!(stdin, b"digraph G {A->B}");
    }

    #[test]
    fn test_convert_unknown_extension() {
        let client = FakeClient::new(b"");

        let err = run(&args("diagram.unknownext"), &client, b"").unwrap_err();

        assert!(
            matches!(
                err,
                CliError::Format(FormatError::UnresolvableExtension { .. })
            ),
            "got {err:?}"
        );
    }

    #[test]
    fn test_convert_invalid_format() {
        let client = FakeClient::new(b"");
        let mut args = args("-");
        args.diagram_type = Some("graphviz".to_owned());
        args.format = Some("gif".to_owned());

        let err = run(&args, &client, b"").unwrap_err();

        assert!(
            matches!(err, CliError::Format(FormatError::InvalidImageFormat(_))),
            "got {err:?}"
        );
        assert_eq!(err.to_string(), "invalid image format 'gif'");
    }

    #[test]
    fn test_convert_render_failure() {
        let client = FakeClient::failing(400);
        let mut args = args("-");
        args.diagram_type = Some("graphviz".to_owned());

        let err = run(&args, &client, b"digraph G {").unwrap_err();

        assert!(matches!(err, CliError::Render(_)), "got {err:?}");
        assert!(err.to_string().contains("Syntax Error"));
    }

    #[test]
    fn test_convert_missing_input_file() {
        let client = FakeClient::new(b"");

        let err = run(&args("/nonexistent/hello.dot"), &client, b"").unwrap_err();

        assert!(matches!(err, CliError::ReadInput { .. }), "got {err:?}");
        assert!(client.calls.borrow().is_empty());
    }

    #[test]
    fn test_write_diagram_text_gets_newline() {
        let mut out = Vec::new();
        let diagram = RenderedDiagram {
            image_format: ImageFormat::Svg,
            bytes: b"<svg/>".to_vec(),
        };
        write_diagram(&mut out, &diagram).unwrap();
        assert_eq!(out, b"<svg/>\n");
    }
}
