//! Yes-And CLI - improv in the terminal
//!
//! Play a scene with a persona, then turn it into an image.

mod api;
mod config;
mod sse;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{Input, Select};
use std::fs;
use std::io::{self, Write};
use yesand::Message;

use api::{PersonaInfo, YesAndClient};
use config::Config;

#[derive(Parser)]
#[command(name = "yesand")]
#[command(about = "Yes-And CLI - improv scenes that become images", long_about = None)]
#[command(version)]
struct Cli {
    /// Print debug logs to stderr
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or update configuration
    Config {
        /// Server base URL
        #[arg(long)]
        base_url: Option<String>,
        /// Default persona ID for `play`
        #[arg(short, long)]
        persona: Option<String>,
    },

    /// List personas
    Personas,

    /// Print an audience suggestion
    Suggest,

    /// Start an improv scene
    Play {
        /// Persona ID (prompts if neither given nor configured)
        #[arg(short, long)]
        persona: Option<String>,
        /// Wait for whole replies instead of streaming them
        #[arg(long)]
        no_stream: bool,
    },

    /// Download a generated image through the server proxy
    Download {
        /// Image URL returned by /imagine
        url: String,
        /// Output file
        #[arg(short, long, default_value = "yesand.png")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info,yesand=debug".into()),
            )
            .with_writer(io::stderr)
            .init();
    }

    match cli.command {
        Commands::Config { base_url, persona } => cmd_config(base_url, persona).await,
        Commands::Personas => cmd_personas().await,
        Commands::Suggest => cmd_suggest().await,
        Commands::Play { persona, no_stream } => cmd_play(persona, no_stream).await,
        Commands::Download { url, output } => cmd_download(url, output).await,
    }
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_config(base_url: Option<String>, persona: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    if base_url.is_none() && persona.is_none() {
        println!("{}", "Configuration:".bold());
        println!("  Path: {:?}", Config::config_path()?);
        println!("  Base URL: {}", config.base_url);
        println!(
            "  Default Persona: {}",
            config.default_persona.as_deref().unwrap_or("None").cyan()
        );
        return Ok(());
    }

    if let Some(url) = base_url {
        config.set_base_url(&url);

        let client = YesAndClient::new(&config.base_url);
        print!("Testing connection... ");
        match client.health().await {
            Ok(true) => println!("{}", "OK".green()),
            _ => println!("{}", "unreachable (saved anyway)".yellow()),
        }
    }

    if let Some(id) = persona {
        config.set_default_persona(id);
    }

    config.save()?;
    println!("{} Configuration saved to {:?}", "✓".green(), Config::config_path()?);

    Ok(())
}

async fn cmd_personas() -> Result<()> {
    let config = Config::load()?;
    let client = YesAndClient::new(&config.base_url);

    let personas = client.list_personas().await?;
    if personas.is_empty() {
        println!("No personas found.");
        return Ok(());
    }

    println!("{}", "Personas:".bold());
    for persona in personas {
        println!(
            "  {} {} - {}",
            persona.name.cyan().bold(),
            format!("({})", persona.id).dimmed(),
            persona.tagline
        );
        println!(
            "    {} {}",
            "toward:".green(),
            persona.aesthetic.pulls_toward.join(", ")
        );
        println!(
            "    {} {}",
            "away from:".red(),
            persona.aesthetic.pulls_away_from.join(", ")
        );
    }

    Ok(())
}

async fn cmd_suggest() -> Result<()> {
    let config = Config::load()?;
    let client = YesAndClient::new(&config.base_url);

    println!("{}", client.suggest().await?);

    Ok(())
}

async fn cmd_play(persona: Option<String>, no_stream: bool) -> Result<()> {
    let config = Config::load()?;
    let client = YesAndClient::new(&config.base_url);

    let personas = client.list_personas().await?;
    let persona = choose_persona(personas, persona.or(config.default_persona))?;

    println!(
        "\n{} {} {}",
        "Scene partner:".bold(),
        persona.name.cyan().bold(),
        persona.tagline.dimmed()
    );

    match client.suggest().await {
        Ok(word) => println!("{} {}", "Audience suggestion:".bold(), word.yellow()),
        Err(e) => tracing::debug!("No suggestion: {}", e),
    }
    println!(
        "{}\n",
        "Type a line to start. /imagine paints the scene, /quit leaves.".dimmed()
    );

    let mut history: Vec<Message> = Vec::new();

    loop {
        let line: String = Input::new()
            .with_prompt("You")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read input")?;
        let line = line.trim();

        match line {
            "" => continue,
            "/quit" | "/exit" => break,
            "/imagine" => {
                if history.is_empty() {
                    println!("{}", "Say something first.".yellow());
                } else {
                    imagine(&client, &persona.id, &history).await;
                }
                continue;
            }
            _ => {}
        }

        history.push(Message::human(line));

        let label = format!("{}:", persona.name).cyan().bold();
        let reply = if no_stream {
            client.chat(&persona.id, &history).await.map(|text| {
                println!("{} {}", label, text);
                text
            })
        } else {
            print!("{} ", label);
            let _ = io::stdout().flush();
            let result = client
                .chat_stream(&persona.id, &history, |chunk| {
                    print!("{}", chunk);
                    let _ = io::stdout().flush();
                })
                .await;
            println!();
            result
        };

        match reply {
            Ok(text) => history.push(Message::ai(text)),
            Err(e) => {
                // Drop the unanswered line so it can be retried
                history.pop();
                eprintln!("{} {}", "✗".red(), e);
            }
        }
    }

    println!("{}", "Scene!".bold());
    Ok(())
}

fn choose_persona(personas: Vec<PersonaInfo>, requested: Option<String>) -> Result<PersonaInfo> {
    if personas.is_empty() {
        bail!("The server has no personas configured");
    }

    if let Some(id) = requested {
        return personas
            .into_iter()
            .find(|p| p.id == id)
            .with_context(|| format!("Unknown persona: {}", id));
    }

    let labels: Vec<String> = personas
        .iter()
        .map(|p| format!("{} - {}", p.name, p.tagline))
        .collect();

    let index = Select::new()
        .with_prompt("Choose your scene partner")
        .items(&labels)
        .default(0)
        .interact()
        .context("Failed to read selection")?;

    personas
        .into_iter()
        .nth(index)
        .context("No persona selected")
}

async fn imagine(client: &YesAndClient, persona_id: &str, history: &[Message]) {
    println!("{}", "Painting the scene...".dimmed());

    match client.generate(persona_id, history).await {
        Ok(image) => {
            println!("{} {}", "Prompt:".bold(), image.prompt_used);
            println!("{} {}", "Image:".bold(), image.image_url.green());
            println!(
                "{}",
                format!("Save it with: yesand download \"{}\"", image.image_url).dimmed()
            );
        }
        Err(e) => eprintln!("{} {}", "✗".red(), e),
    }
}

async fn cmd_download(url: String, output: String) -> Result<()> {
    let config = Config::load()?;
    let client = YesAndClient::new(&config.base_url);

    let bytes = client.download(&url).await?;
    fs::write(&output, &bytes).with_context(|| format!("Failed to write {}", output))?;

    println!("{} Saved {} bytes to {}", "✓".green(), bytes.len(), output);

    Ok(())
}
