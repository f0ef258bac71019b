//! Terminal front end for the browse session
//!
//! A line-oriented stand-in for the pointer/keyboard surface: each input
//! line becomes one key event for the session. Rendering proper (cards,
//! covers, charts) is outside this binary's scope.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::Path;
use std::time::Instant;
use vault_core::{Key, Modal, Session, ViewMode};

/// Run the interactive browse loop until EOF or `q`
pub fn run(session: &mut Session) -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    println!("GrooveVault browse. Keys: left right enter space esc | list stats q");
    print_state(session);

    for line in stdin.lock().lines() {
        let line = line?;
        let now = Instant::now();

        match line.trim() {
            "q" | "quit" => break,
            "list" => list(session, "", None)?,
            "stats" => stats(session)?,
            "" => {}
            word => match parse_key(word) {
                Some(key) => {
                    session.handle_key(key, now);
                    session.poll_contrast();
                    print_state(session);
                }
                None => println!("Unknown input: {}", word),
            },
        }
        stdout.flush()?;
    }

    tracing::info!("Browse session ended");
    Ok(())
}

fn parse_key(word: &str) -> Option<Key> {
    match word {
        "left" | "h" => Some(Key::Left),
        "right" | "l" => Some(Key::Right),
        "space" => Some(Key::Space),
        "enter" => Some(Key::Enter),
        "esc" | "escape" => Some(Key::Escape),
        _ => None,
    }
}

fn print_state(session: &Session) {
    let nav = session.nav();
    let mode = match nav.view_mode() {
        ViewMode::Stand => "stand",
        ViewMode::Stack => "stack",
    };
    let modal = match nav.modal() {
        Modal::None => String::new(),
        Modal::Inspecting => {
            let face = if nav.jacket_flipped() { "back" } else { "front" };
            format!(" [inspecting:{}]", face)
        }
        Modal::Media { kind, index } => format!(" [media:{:?}@{}]", kind, index),
        Modal::Stats => " [stats]".into(),
        Modal::Backup => " [backup]".into(),
    };

    match session.active_record() {
        Some(record) => println!(
            "({}/{}) {} — {} ({}) [{}]{}",
            nav.active_index() + 1,
            session.records().len(),
            record.title,
            record.artist,
            record.year,
            mode,
            modal
        ),
        None => println!("(empty collection) [{}]{}", mode, modal),
    }
}

/// Print the index view: optionally filtered, newest first
pub fn list(session: &Session, search: &str, genre: Option<&str>) -> Result<()> {
    let records = vault_core::filter_records(session.records(), search, genre);
    for (i, record) in records.iter().enumerate() {
        println!(
            "{:>3}. {} — {} ({}) {}",
            i + 1,
            record.title,
            record.artist,
            record.year,
            "*".repeat(record.rating as usize)
        );
    }
    if records.len() != session.records().len() {
        println!("{} of {} records", records.len(), session.records().len());
    }
    Ok(())
}

/// Print aggregate collection statistics
pub fn stats(session: &Session) -> Result<()> {
    let stats = session.stats();
    println!("Records:    {}", stats.total);
    println!("Top genre:  {}", stats.top_genre);
    println!("Top artist: {}", stats.top_artist);
    println!("Avg rating: {}", stats.avg_rating_label());
    for bar in &stats.genre_chart {
        println!("  {:<20} {}", bar.name, "#".repeat(bar.value));
    }
    Ok(())
}

/// Write a backup file
pub fn export(session: &Session, file: &Path) -> Result<()> {
    let json = session.export()?;
    std::fs::write(file, json)?;
    println!("Exported {} records to {}", session.records().len(), file.display());
    Ok(())
}

/// Replace the collection from a backup file
pub fn import(session: &mut Session, file: &Path) -> Result<()> {
    let raw = std::fs::read(file)?;
    match session.import(&raw) {
        Ok(count) => {
            println!("Imported {} records", count);
            Ok(())
        }
        Err(e) => {
            println!("{}", e.user_message());
            Err(e.into())
        }
    }
}
