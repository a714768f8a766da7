use anyhow::Result;
use httpmock::prelude::*;
use scholar_homepage::core::bootstrap::PipelineStatus;
use scholar_homepage::{CliConfig, LocalStorage, SiteEngine};
use tempfile::TempDir;

const TEMPLATE: &str = r#"<html><body>
<h1 data-profile-name>Loading</h1>
<p data-profile-links></p>
<div data-about-content></div>
<div data-publications></div>
<ul data-service-list></ul>
</body></html>"#;

const FILES: [&str; 4] = [
    "/data/profile.json",
    "/data/about.md",
    "/data/publications.json",
    "/data/service.json",
];

fn serve_all_except(server: &MockServer, missing: &str) {
    for path in FILES {
        if path == missing {
            server.mock(|when, then| {
                when.method(GET).path(path);
                then.status(404);
            });
            continue;
        }

        let body = match path {
            "/data/profile.json" => r#"{"name": "Ada Lovelace", "email": "ada@example.com"}"#,
            "/data/about.md" => "About Ada.",
            "/data/publications.json" => r#"{"publications": [{"title": "Engines"}]}"#,
            _ => r#"{"items": ["Reviewer"]}"#,
        };
        server.mock(|when, then| {
            when.method(GET).path(path);
            then.status(200).body(body);
        });
    }
}

async fn render_with_missing(missing: &str) -> Result<(String, scholar_homepage::RenderReport)> {
    let temp_dir = TempDir::new()?;
    let template_path = temp_dir.path().join("index.html");
    tokio::fs::write(&template_path, TEMPLATE).await?;

    let server = MockServer::start();
    serve_all_except(&server, missing);

    let config = CliConfig {
        base_url: Some(server.base_url()),
        template: Some(template_path.to_string_lossy().to_string()),
        output: Some(temp_dir.path().join("out.html").to_string_lossy().to_string()),
        no_markdown: true,
        ..Default::default()
    };

    let output = SiteEngine::new(LocalStorage::new("."), config).run().await?;
    let html = tokio::fs::read_to_string(&output.output_path).await?;
    Ok((html, output.report))
}

/// 任一資料檔 404 時，只有該區塊顯示 fallback
#[tokio::test]
async fn test_each_missing_file_only_affects_its_section() -> Result<()> {
    let cases = [
        (
            "/data/profile.json",
            "profile",
            r#"<h1 data-profile-name=""><p>Profile unavailable</p></h1>"#,
        ),
        (
            "/data/about.md",
            "about",
            r#"<div data-about-content=""><p>About section coming soon.</p></div>"#,
        ),
        (
            "/data/publications.json",
            "publications",
            r#"<div data-publications=""><p>No publications available yet.</p></div>"#,
        ),
        (
            "/data/service.json",
            "service",
            r#"<ul data-service-list=""><li>No service entries available yet.</li></ul>"#,
        ),
    ];

    for (missing, pipeline, fallback) in cases {
        let (html, report) = render_with_missing(missing).await?;

        assert!(html.contains(fallback), "missing fallback for {}: {}", pipeline, html);
        assert_eq!(report.failed().count(), 1);
        assert!(matches!(
            report.status_of(pipeline),
            Some(PipelineStatus::Failed { error }) if error.contains("404")
        ));

        if pipeline != "profile" {
            assert!(html.contains(r#"<h1 data-profile-name="">Ada Lovelace</h1>"#));
            assert!(html.contains(r#"<a href="mailto:ada@example.com">ada@example.com</a>"#));
        }
        if pipeline != "about" {
            assert!(html.contains(r#"<div data-about-content="">About Ada.</div>"#));
        }
        if pipeline != "publications" {
            assert!(html.contains("<p>Engines</p>"));
        }
        if pipeline != "service" {
            assert!(html.contains(r#"<ul data-service-list=""><li>Reviewer</li></ul>"#));
        }
    }

    Ok(())
}

#[tokio::test]
async fn test_empty_publication_groups_render_fallback_paragraph() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let template_path = temp_dir.path().join("index.html");
    tokio::fs::write(&template_path, TEMPLATE).await?;

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/data/publications.json");
        then.status(200)
            .json_body(serde_json::json!({"publications": [], "preprints": []}));
    });

    let config = CliConfig {
        base_url: Some(server.base_url()),
        template: Some(template_path.to_string_lossy().to_string()),
        output: Some(temp_dir.path().join("out.html").to_string_lossy().to_string()),
        ..Default::default()
    };

    let output = SiteEngine::new(LocalStorage::new("."), config).run().await?;
    let html = tokio::fs::read_to_string(&output.output_path).await?;

    assert_eq!(
        output.report.status_of("publications"),
        Some(&PipelineStatus::Rendered)
    );
    assert!(html.contains(r#"<div data-publications=""><p>No publications available yet.</p></div>"#));
    // 其他檔案沒有 mock，全部走 fallback
    assert_eq!(output.report.failed().count(), 3);

    Ok(())
}
