use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use calcplot::{
    CalcRequest, ComputeService, Config, HttpService, PlotError, PlotRequest, Plotter,
    ServiceError,
};

/// Serves exactly one HTTP response and hands back the raw request it got.
fn serve_once(status: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut head = String::new();
        let mut content_length = 0;
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap();
                }
            }
            head.push_str(&line);
        }
        let mut payload = vec![0; content_length];
        reader.read_exact(&mut payload).unwrap();
        head.push_str(&String::from_utf8_lossy(&payload));

        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .unwrap();
        stream.flush().unwrap();
        tx.send(head).unwrap();
    });

    (url, rx)
}

fn service(url: &str) -> HttpService {
    HttpService::new(url, Duration::from_secs(5))
}

#[test]
fn unparsable_expression_surfaces_the_service_detail() {
    let (url, rx) = serve_once("400 Bad Request", r#"{"detail":"parse error"}"#);
    let plotter = Plotter::new(service(&url));

    let err = plotter
        .plot(&PlotRequest::new("sin(", -1.0, 1.0, 50))
        .unwrap_err();

    assert_eq!(
        err,
        PlotError::Service(ServiceError::Status {
            status: 400,
            message: "parse error".to_string(),
        })
    );
    assert_eq!(err.to_string(), "parse error");
    assert!(err.is_retryable());

    let request = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(request.starts_with("POST /api/plot"));
    assert!(request.contains(r#""expression":"sin(""#));
    assert!(request.contains(r#""points":50"#));
}

#[test]
fn error_without_detail_gets_a_generic_message() {
    let (url, _rx) = serve_once("500 Internal Server Error", "oops");

    let err = service(&url)
        .sample(&PlotRequest::new("x", 0.0, 1.0, 10))
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Plot failed (HTTP 500)");
}

#[test]
fn samples_with_nulls_become_a_split_polyline() {
    let (url, _rx) = serve_once(
        "200 OK",
        r#"{"x":[-2.0,-1.0,0.0,1.0,2.0],"y":[-0.5,-1.0,null,1.0,0.5]}"#,
    );

    let polyline = Plotter::new(service(&url))
        .plot(&PlotRequest::new("1/x", -2.0, 2.0, 5))
        .unwrap();

    assert_eq!(polyline.runs().len(), 2);
    assert_eq!(polyline.vertex_count(), 4);
}

#[test]
fn integral_bounds_are_sent_only_when_complete() {
    let (url, rx) = serve_once(
        "200 OK",
        r#"{"result_expression":"x**3/3","definite_value":9.0}"#,
    );

    let result = service(&url)
        .calculate(&CalcRequest::integral_between("x**2", Some(0.0), Some(3.0)))
        .unwrap();
    assert_eq!(result.definite_value, Some(9.0));

    let request = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert!(request.starts_with("POST /api/calc"));
    assert!(request.contains(r#""operation":"integral""#));
    assert!(request.contains(r#""a":0.0"#));
}

#[test]
fn materials_are_listed() {
    let (url, rx) = serve_once(
        "200 OK",
        r#"[{"slug":"limits","title":"Limits","summary":"Approaching a value","content":"..."}]"#,
    );

    let topics = service(&url).materials().unwrap();

    assert_eq!(topics.len(), 1);
    assert_eq!(topics[0].slug, "limits");
    assert!(topics[0].examples.is_empty());
    assert!(rx.recv_timeout(Duration::from_secs(5)).unwrap().starts_with("GET /api/materials"));
}

#[test]
fn unreachable_service_is_a_transport_error() {
    // Bind and drop to get a port nobody listens on.
    let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();

    let err = service(&format!("http://127.0.0.1:{port}"))
        .sample(&PlotRequest::new("x", 0.0, 1.0, 10))
        .unwrap_err();

    assert!(matches!(err, ServiceError::Transport(_)));
    assert_eq!(err.status(), None);
}

#[test]
fn config_file_drives_the_client() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calcplot.toml");
    std::fs::write(
        &path,
        "backend_url = \"http://calc.internal:9000/\"\ntimeout_secs = 2\n\n[surface]\nwidth = 640\n",
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.timeout(), Duration::from_secs(2));
    assert_eq!(config.surface.width, 640.0);
    assert_eq!(HttpService::from_config(&config).base_url(), "http://calc.internal:9000/");

    std::fs::write(&path, "timeout_secs = \"soon\"\n").unwrap();
    assert!(Config::load(&path).is_err());
}
