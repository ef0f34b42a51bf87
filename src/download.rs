use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

/// Download stats returned after completion.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DownloadStats {
    pub total: usize,
    pub ok: usize,
    pub failed: usize,
}

#[derive(Debug)]
pub enum DownloadOutcome {
    Saved { path: PathBuf, bytes: u64 },
    /// Server answered with a non-success status.
    HttpStatus(u16),
    /// Request or body stream failed before completion.
    Transport(String),
}

/// Fetch each link into `dest_dir`, one after another.
///
/// A failed link is logged and skipped; only local filesystem errors abort the loop.
pub async fn download_all(client: &Client, links: &[String], dest_dir: &Path) -> Result<DownloadStats> {
    let mut stats = DownloadStats {
        total: links.len(),
        ..Default::default()
    };

    for link in links {
        println!("Downloading: {}", link);
        match download_file(client, link, dest_dir).await? {
            DownloadOutcome::Saved { path, bytes } => {
                info!("Saved {} bytes to {}", bytes, path.display());
                stats.ok += 1;
            }
            DownloadOutcome::HttpStatus(code) => {
                warn!("Skipped {}: HTTP {}", link, code);
                stats.failed += 1;
            }
            DownloadOutcome::Transport(reason) => {
                warn!("Skipped {}: {}", link, reason);
                stats.failed += 1;
            }
        }
    }

    info!(
        "Downloaded {} files ({} ok, {} failed)",
        stats.total, stats.ok, stats.failed
    );
    Ok(stats)
}

/// Stream one URL to `dest_dir/<file_name_for(url)>`, flushing and syncing after every chunk.
pub async fn download_file(client: &Client, url: &str, dest_dir: &Path) -> Result<DownloadOutcome> {
    tokio::fs::create_dir_all(dest_dir)
        .await
        .with_context(|| format!("Failed to create {}", dest_dir.display()))?;
    let path = dest_dir.join(file_name_for(url));

    let mut response = match client.get(url).send().await {
        Ok(r) => r,
        Err(e) => {
            warn!("Download failed for {}: {}", url, e);
            return Ok(DownloadOutcome::Transport(e.to_string()));
        }
    };

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!("Download failed: status code {}\n{}", status.as_u16(), body);
        return Ok(DownloadOutcome::HttpStatus(status.as_u16()));
    }

    println!("Saving to {}", path.display());
    let pb = progress_bar(response.content_length())?;
    let mut file = tokio::fs::File::create(&path)
        .await
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let mut bytes = 0u64;
    loop {
        let chunk = match response.chunk().await {
            Ok(Some(chunk)) => chunk,
            Ok(None) => break,
            Err(e) => {
                pb.abandon();
                warn!("Download of {} interrupted after {} bytes: {}", url, bytes, e);
                return Ok(DownloadOutcome::Transport(e.to_string()));
            }
        };
        if chunk.is_empty() {
            continue;
        }
        write_durably(&mut file, &chunk)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        bytes += chunk.len() as u64;
        pb.set_position(bytes);
    }

    pb.finish_and_clear();
    Ok(DownloadOutcome::Saved { path, bytes })
}

async fn write_durably(file: &mut tokio::fs::File, chunk: &[u8]) -> std::io::Result<()> {
    file.write_all(chunk).await?;
    file.flush().await?;
    file.sync_all().await
}

/// Last path segment of the URL, with spaces (raw or percent-encoded) replaced by `_`.
pub fn file_name_for(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let name = path
        .rsplit('/')
        .next()
        .unwrap_or("")
        .replace("%20", "_")
        .replace(' ', "_");
    if name.is_empty() {
        "download".to_string()
    } else {
        name
    }
}

fn progress_bar(len: Option<u64>) -> Result<ProgressBar> {
    let pb = match len {
        Some(len) => {
            let pb = ProgressBar::new(len);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] {bar:40} {bytes}/{total_bytes} ({bytes_per_sec}, eta {eta})")?
                    .progress_chars("=> "),
            );
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(ProgressStyle::default_spinner().template("{spinner} {bytes} ({bytes_per_sec})")?);
            pb
        }
    };
    Ok(pb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    type Route = (&'static str, u16, &'static str);

    /// Minimal HTTP/1.1 responder: one canned response per path, 404 otherwise.
    async fn serve(routes: &'static [Route]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                loop {
                    let n = socket.read(&mut chunk).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    buf.extend_from_slice(&chunk[..n]);
                    if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                let request = String::from_utf8_lossy(&buf);
                let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();
                let (status, body) = routes
                    .iter()
                    .find(|(p, _, _)| *p == path)
                    .map(|(_, s, b)| (*s, *b))
                    .unwrap_or((404, "not found"));
                let response = format!(
                    "HTTP/1.1 {} Test\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        format!("http://{}", addr)
    }

    fn client() -> Client {
        Client::builder().no_proxy().build().unwrap()
    }

    #[test]
    fn file_names_from_urls() {
        assert_eq!(file_name_for("https://x.net/downloads/RSP1/RSP1.vcf.gz"), "RSP1.vcf.gz");
        assert_eq!(file_name_for("https://x.net/reports/RSP1 report.pdf"), "RSP1_report.pdf");
        assert_eq!(file_name_for("https://x.net/reports/RSP1%20report.pdf"), "RSP1_report.pdf");
        assert_eq!(file_name_for("https://x.net/f/data.bam?token=abc"), "data.bam");
        assert_eq!(file_name_for("https://x.net/files/"), "download");
    }

    #[tokio::test]
    async fn saves_body_under_url_basename() {
        static ROUTES: [Route; 1] = [("/files/RSP1%20variants.vcf", 200, "##fileformat=VCFv4.2\n")];
        let base = serve(&ROUTES).await;
        let tmp = tempfile::tempdir().unwrap();

        let url = format!("{}/files/RSP1%20variants.vcf", base);
        let outcome = download_file(&client(), &url, tmp.path()).await.unwrap();

        let (path, bytes) = match outcome {
            DownloadOutcome::Saved { path, bytes } => (path, bytes),
            other => panic!("expected saved file, got {:?}", other),
        };
        assert_eq!(path, tmp.path().join("RSP1_variants.vcf"));
        assert_eq!(bytes, 21);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "##fileformat=VCFv4.2\n");
    }

    #[tokio::test]
    async fn non_success_status_is_reported_not_saved() {
        static ROUTES: [Route; 1] = [("/files/gone.bam", 410, "expired link")];
        let base = serve(&ROUTES).await;
        let tmp = tempfile::tempdir().unwrap();

        let url = format!("{}/files/gone.bam", base);
        let outcome = download_file(&client(), &url, tmp.path()).await.unwrap();
        assert!(matches!(outcome, DownloadOutcome::HttpStatus(410)));
        assert!(!tmp.path().join("gone.bam").exists());
    }

    #[tokio::test]
    async fn failures_do_not_stop_remaining_downloads() {
        static ROUTES: [Route; 2] = [("/a.vcf", 200, "AAAA"), ("/c.pdf", 200, "%PDF")];
        let base = serve(&ROUTES).await;

        // Port that was bound then released: connection refused.
        let closed = {
            let l = TcpListener::bind("127.0.0.1:0").await.unwrap();
            l.local_addr().unwrap()
        };

        let links = vec![
            format!("{}/a.vcf", base),
            format!("{}/missing.bam", base),
            format!("http://{}/b.fastq", closed),
            format!("{}/c.pdf", base),
        ];
        let tmp = tempfile::tempdir().unwrap();
        let stats = download_all(&client(), &links, tmp.path()).await.unwrap();

        assert_eq!(
            stats,
            DownloadStats {
                total: 4,
                ok: 2,
                failed: 2
            }
        );
        assert_eq!(std::fs::read_to_string(tmp.path().join("a.vcf")).unwrap(), "AAAA");
        assert_eq!(std::fs::read_to_string(tmp.path().join("c.pdf")).unwrap(), "%PDF");
        assert!(!tmp.path().join("missing.bam").exists());
    }

    #[tokio::test]
    async fn refused_connection_carries_reason() {
        let closed = {
            let l = TcpListener::bind("127.0.0.1:0").await.unwrap();
            l.local_addr().unwrap()
        };
        let tmp = tempfile::tempdir().unwrap();
        let url = format!("http://{}/b.fastq", closed);
        let outcome = download_file(&client(), &url, tmp.path()).await.unwrap();
        match outcome {
            DownloadOutcome::Transport(reason) => assert!(!reason.is_empty()),
            other => panic!("expected transport failure, got {:?}", other),
        }
        assert!(!tmp.path().join("b.fastq").exists());
    }

    #[tokio::test]
    async fn empty_link_list() {
        let tmp = tempfile::tempdir().unwrap();
        let stats = download_all(&client(), &[], tmp.path()).await.unwrap();
        assert_eq!(stats, DownloadStats::default());
    }
}
