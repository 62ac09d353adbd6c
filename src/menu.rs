use std::time::Duration;

use google_cogs::Embed;
use google_cogs::pages::{MenuAction, MenuSession};
use tokio::io::{AsyncBufReadExt, BufReader};

const PROMPT: &str = "[f]irst [p]rev [n]ext [l]ast <page> [q]uit";

/// Print an embed as text, or as JSON when asked
pub fn show(embed: &Embed, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(embed)?);
    } else {
        println!("{}", embed.render_text());
    }
    Ok(())
}

/// Drive a paged reply from stdin until the user quits, input ends, or no
/// input arrives within `timeout`
pub async fn run(
    mut menu: Box<dyn MenuSession>,
    timeout: Duration,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    show(&menu.render(), json)?;
    if menu.page_count() <= 1 {
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        eprintln!(
            "page {}/{} {}",
            menu.current_page() + 1,
            menu.page_count(),
            PROMPT
        );
        let line = match tokio::time::timeout(timeout, lines.next_line()).await {
            Ok(line) => line?,
            Err(_) => {
                ::log::info!("Menu timed out after {:?}", timeout);
                break;
            }
        };
        let Some(line) = line else {
            break;
        };

        match MenuAction::parse(&line) {
            Some(MenuAction::Stop) => break,
            Some(action) => {
                if menu.navigate(action) {
                    show(&menu.render(), json)?;
                } else {
                    ::log::debug!("{:?} left the menu on page {}", action, menu.current_page() + 1);
                }
            }
            None => eprintln!("Unknown action {:?}", line.trim()),
        }
    }
    Ok(())
}
