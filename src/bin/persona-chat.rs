//! Interactive portfolio with a chat persona.
//!
//! This binary shows the portfolio in the terminal and lets visitors ask the
//! persona questions, relayed to an OpenAI-compatible API.
//!
//! # Usage
//!
//! ```bash
//! # Built-in persona and profile, key from $OPENAI_API_KEY
//! persona-chat
//!
//! # Your own content
//! persona-chat --persona me.md --profile me.yaml --assets images
//!
//! # A local OpenAI-compatible server
//! persona-chat --base-url http://localhost:11434/v1/ --model llama3.1:8b
//! ```
//!
//! # Commands
//!
//! - `/profile`, `/projects`, `/awards`, `/section <key>` - Browse the portfolio
//! - `/key <api-key>` - Supply an API key when none is configured
//! - `/history` - Replay the conversation
//! - `/stats` - Show session statistics
//! - `/quit` - Exit the application

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use persona_chat::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatSession, PlainTextRenderer, Renderer, help_text,
    parse_command,
};
use persona_chat::portfolio::{DirectoryAssets, Profile};
use persona_chat::{Credential, OpenAi, Persona};

/// Main entry point for the persona-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("persona-chat [OPTIONS]");
    let config = ChatConfig::from(args);

    let profile = match &config.profile_path {
        Some(path) => Profile::from_file(path)?,
        None => Profile::builtin()?,
    };
    let persona = match &config.persona_path {
        Some(path) => Persona::from_file(profile.name.clone(), path)?,
        None => Persona::default(),
    };
    let persona_name = persona.name.clone();
    let assets = DirectoryAssets::new(&config.assets_dir);

    let client = OpenAi::with_options(config.base_url.clone(), Some(config.timeout))?;
    let mut session = ChatSession::new(client, persona, config.model.clone());
    let mut renderer = PlainTextRenderer::with_color(config.use_color);
    let mut rl = DefaultEditor::new()?;

    let configured = Credential::from_env(&config.credential_var);
    let mut credential = Credential::resolve(Some(configured.clone()), None);

    renderer.print_profile(&profile, &assets);
    renderer.print_info(&format!(
        "Ask {} anything (model: {}). Type /help for commands, /quit to exit.",
        persona_name,
        session.model()
    ));
    renderer.print_info("Try: \"What was hardest about the drone build?\"\n");
    if credential.is_empty() {
        renderer.print_notice(&missing_key_notice(&config.credential_var));
    }

    loop {
        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                if let Some(cmd) = parse_command(line) {
                    if !matches!(cmd, ChatCommand::Key(_)) {
                        let _ = rl.add_history_entry(line);
                    }
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Profile => {
                            renderer.print_profile(&profile, &assets);
                        }
                        ChatCommand::Sections => {
                            for section in &profile.sections {
                                renderer.print_info(&format!(
                                    "    {} - {}",
                                    section.key, section.title
                                ));
                            }
                        }
                        ChatCommand::Section(key) => match profile.section(&key) {
                            Some(section) => renderer.print_section(section, &assets),
                            None => renderer.print_error(&format!(
                                "No section named {key:?}; try /sections"
                            )),
                        },
                        ChatCommand::History => {
                            if session.visible_turns().next().is_none() {
                                renderer.print_info("No conversation yet.");
                            }
                            for turn in session.visible_turns() {
                                renderer.print_turn(&persona_name, turn);
                            }
                        }
                        ChatCommand::Key(secret) => {
                            if !configured.is_empty() {
                                renderer.print_info(&format!(
                                    "An API key is already configured via ${}.",
                                    config.credential_var
                                ));
                            } else {
                                credential = Credential::resolve(
                                    Some(configured.clone()),
                                    Some(Credential::new(secret)),
                                );
                                if credential.is_empty() {
                                    renderer.print_notice(&missing_key_notice(
                                        &config.credential_var,
                                    ));
                                } else {
                                    renderer.print_info("API key set for this session.");
                                }
                            }
                        }
                        ChatCommand::Stats => {
                            print_stats(&session);
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                let _ = rl.add_history_entry(line);
                match session.submit(line, &credential).await {
                    Ok(turn) => renderer.print_turn(&persona_name, turn),
                    Err(err) if err.is_missing_credential() => {
                        renderer.print_notice(&missing_key_notice(&config.credential_var));
                    }
                    Err(err) => renderer.print_error(&err.to_string()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

fn missing_key_notice(var: &str) -> String {
    format!("An API key is needed to chat. Set ${var} or type /key <api-key>.")
}

fn print_stats(session: &ChatSession) {
    let stats = session.stats();
    println!("    Session Statistics:");
    println!("      Persona: {}", stats.persona);
    println!("      Model: {}", stats.model);
    println!("      Turns: {}", stats.visible_turns);
    println!(
        "      Requests: {} ({} failed)",
        stats.total_requests, stats.failed_requests
    );
    println!(
        "      Total tokens: {} in / {} out",
        stats.total_prompt_tokens, stats.total_completion_tokens
    );
    if let Some(usage) = stats.last_turn_usage {
        println!(
            "      Last turn tokens: {} in / {} out",
            usage.prompt_tokens, usage.completion_tokens
        );
    }
}
