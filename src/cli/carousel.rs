// src/cli/carousel.rs
// Interactive terminal carousel: the driver ticks in its own task while this
// loop renders views and turns stdin lines into commands

use anyhow::Result;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::search::build_finder;
use crate::carousel::{Carousel, CarouselCommand, CarouselView, spawn_carousel};
use crate::config::FactdeckConfig;
use crate::error::FactError;
use crate::facts::{Fact, builtin_facts};
use crate::favorites::Favorites;

const PROGRESS_WIDTH: usize = 30;

const HELP: &str = "\
commands:
  n            next fact
  p            previous fact
  <enter>      pause / resume
  h            toggle hover (suspends the timer)
  f            favorite / unfavorite the current fact
  l            list favorites
  s <query>    search Wikipedia
  c            back to the built-in facts
  q            quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalInput {
    Next,
    Previous,
    TogglePause,
    ToggleHover,
    Favorite,
    ListFavorites,
    Search(String),
    Clear,
    Help,
    Quit,
    Unknown(String),
}

/// Parse one line typed by the user
pub fn parse_input(line: &str) -> TerminalInput {
    if line.trim().is_empty() {
        return TerminalInput::TogglePause;
    }

    let trimmed = line.trim();
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (trimmed, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "n" | "next" => TerminalInput::Next,
        "p" | "prev" | "previous" => TerminalInput::Previous,
        "pause" | "resume" => TerminalInput::TogglePause,
        "h" | "hover" => TerminalInput::ToggleHover,
        "f" | "fav" | "favorite" => TerminalInput::Favorite,
        "l" | "favorites" => TerminalInput::ListFavorites,
        "s" | "search" => TerminalInput::Search(rest.to_string()),
        "c" | "clear" => TerminalInput::Clear,
        "?" | "help" => TerminalInput::Help,
        "q" | "quit" | "exit" => TerminalInput::Quit,
        _ => TerminalInput::Unknown(trimmed.to_string()),
    }
}

/// `[#########.....................]  30%`
pub fn render_progress(progress: f64, width: usize) -> String {
    let clamped = progress.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    format!(
        "[{}{}] {:>3.0}%",
        "#".repeat(filled),
        ".".repeat(width - filled),
        clamped
    )
}

fn render_fact(view: &CarouselView, favorites: &Favorites) {
    let star = if favorites.contains(&view.fact.content) { "*" } else { " " };
    let position = if view.showing_override {
        "search".to_string()
    } else {
        format!("{}/{}", view.index + 1, view.total)
    };
    println!();
    println!(
        "{star} [{position}] ({}) {}",
        view.fact.category_or_default(),
        view.fact.content
    );
}

fn render_status(view: &CarouselView) {
    let state = if view.suspended { " paused" } else { "" };
    print!("\r{}{state}   ", render_progress(view.progress, PROGRESS_WIDTH));
    let _ = std::io::stdout().flush();
}

pub async fn run_carousel(config: &FactdeckConfig) -> Result<()> {
    let carousel = Carousel::new(builtin_facts(config.shuffle), config.timer_config())?;
    let finder = Arc::new(build_finder(config)?);
    let mut favorites = Favorites::new();
    let mut hovering = false;

    let handle = spawn_carousel(carousel, |view| {
        debug!(index = view.index, "advanced to next fact");
    });
    let mut views = handle.subscribe();
    let (search_tx, mut search_rx) = mpsc::channel::<Result<Fact, FactError>>(4);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    info!("Terminal carousel started");
    println!("{HELP}");
    let mut shown = handle.view();
    render_fact(&shown, &favorites);
    render_status(&shown);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,

            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = views.borrow_and_update().clone();
                if view.fact != shown.fact || view.index != shown.index {
                    render_fact(&view, &favorites);
                }
                render_status(&view);
                shown = view;
            }

            Some(found) = search_rx.recv() => match found {
                Ok(fact) => handle.show_override(fact).await?,
                Err(e) => println!("\n! {}", e.user_message()),
            },

            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_input(&line) {
                    TerminalInput::Quit => break,
                    TerminalInput::Next => handle.next().await?,
                    TerminalInput::Previous => handle.previous().await?,
                    TerminalInput::TogglePause => handle.send(CarouselCommand::TogglePause).await?,
                    TerminalInput::ToggleHover => {
                        hovering = !hovering;
                        handle.send(CarouselCommand::SetHovering(hovering)).await?
                    }
                    TerminalInput::Clear => handle.send(CarouselCommand::ClearOverride).await?,
                    TerminalInput::Favorite => {
                        let now_favorite = favorites.toggle(&shown.fact.content);
                        println!("\n{}", if now_favorite { "Added to favorites" } else { "Removed from favorites" });
                    }
                    TerminalInput::ListFavorites => {
                        println!();
                        if favorites.is_empty() {
                            println!("No favorites yet");
                        }
                        for fact in favorites.iter() {
                            println!("* {fact}");
                        }
                    }
                    TerminalInput::Search(query) => {
                        if finder.is_loading() {
                            println!("\n! {}", FactError::Busy.user_message());
                            continue;
                        }
                        println!("\nSearching...");
                        let finder = finder.clone();
                        let search_tx = search_tx.clone();
                        tokio::spawn(async move {
                            let _ = search_tx.send(finder.find(&query).await).await;
                        });
                    }
                    TerminalInput::Help => println!("\n{HELP}"),
                    TerminalInput::Unknown(input) => println!("\nUnknown command '{input}', type ? for help"),
                }
            }
        }
    }

    let carousel = handle.shutdown().await?;
    println!();
    info!(index = carousel.current_index(), favorites = favorites.len(), "Terminal carousel stopped");
    Ok(())
}
