use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use parola_panel::models::{find_effect, EFFECTS};
use parola_panel::ui::{AutoConfirm, Confirm, SliderKind};
use parola_panel::{ControlPanel, PanelConfig};

/// Parola LED 点阵屏控制面板
#[derive(Parser, Debug)]
#[command(name = "parola-panel", version, about = "Control a Parola LED matrix over its HTTP API")]
struct Args {
    /// Device base URL (overrides PAROLA_URL)
    #[arg(short, long)]
    url: Option<String>,

    /// Session file holding the token (overrides PAROLA_SESSION_FILE)
    #[arg(short, long)]
    session_file: Option<PathBuf>,

    /// Answer yes to confirmation prompts
    #[arg(short, long)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the session token
    Login {
        #[arg(short, long, default_value = "admin")]
        username: String,
        /// Read from stdin when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Forget the session token
    Logout,
    /// Fetch and print the device status
    Status,
    /// Poll the device and re-render on every change
    Watch,
    /// Set brightness (1-15)
    Bright {
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    /// Set animation speed (1-10)
    Speed {
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    /// Select an effect by index or name
    Effect { effect: String },
    /// List the available effects
    Effects,
    /// Replace the scrolling message
    Message { text: String },
    /// Save WiFi credentials and restart the device
    Wifi {
        ssid: String,
        #[arg(short, long, default_value = "")]
        password: String,
    },
    /// Clear all settings and reboot
    Reset,
    /// Upload a firmware image
    Update { file: PathBuf },
}

/// 在终端上询问 y/N
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, question: &str) -> bool {
        eprint!("{} [y/N] ", question);
        let _ = io::stderr().flush();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim(), "y" | "Y" | "yes" | "YES")
    }
}

fn read_password() -> anyhow::Result<String> {
    eprint!("Password: ");
    io::stderr().flush()?;
    let mut password = String::new();
    io::stdin()
        .lock()
        .read_line(&mut password)
        .context("Failed to read password")?;
    Ok(password.trim_end_matches(['\r', '\n']).to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载环境变量
    dotenv::dotenv().ok();

    let args = Args::parse();
    let mut config = PanelConfig::from_env();
    if let Some(url) = args.url {
        config.device_url = url;
    }
    if let Some(path) = args.session_file {
        config.session_file = path;
    }

    // 初始化日志（输出到 stderr）
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("parola_panel={}", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let confirm: Arc<dyn Confirm> = if args.yes {
        Arc::new(AutoConfirm(true))
    } else {
        Arc::new(StdinConfirm)
    };
    let panel = ControlPanel::with_session_file(config, confirm)
        .context("Failed to create control panel")?;

    match args.command {
        Command::Login { username, password } => {
            let password = match password {
                Some(password) => password,
                None => read_password()?,
            };
            panel.login(&username, &password).await?;
            println!("{}", panel.view());
        }
        Command::Logout => {
            panel.logout()?;
            println!("Logged out");
        }
        Command::Status => {
            ensure_logged_in(&panel)?;
            panel.fetch_status().await.context("Failed to fetch status")?;
            println!("{}", panel.view());
        }
        Command::Watch => watch(&panel).await?,
        Command::Bright { value } => {
            set_slider(&panel, SliderKind::Brightness, value).await?;
        }
        Command::Speed { value } => {
            set_slider(&panel, SliderKind::Speed, value).await?;
        }
        Command::Effect { effect } => {
            let Some(index) = find_effect(&effect) else {
                bail!("Unknown effect: {}", effect);
            };
            ensure_logged_in(&panel)?;
            panel.select_effect(index).await?;
            print_toast(&panel);
        }
        Command::Effects => {
            for (index, effect) in EFFECTS.iter().enumerate() {
                println!("{:>2}  {:<22} {}", index, effect.icon, effect.name);
            }
        }
        Command::Message { text } => {
            ensure_logged_in(&panel)?;
            panel.edit_message(&text).await?;
            print_toast(&panel);
        }
        Command::Wifi { ssid, password } => {
            ensure_logged_in(&panel)?;
            let result = panel.save_wifi(&ssid, &password).await;
            print_toast(&panel);
            result?;
        }
        Command::Reset => {
            ensure_logged_in(&panel)?;
            let result = panel.reset_all().await;
            print_toast(&panel);
            result?;
        }
        Command::Update { file } => {
            ensure_logged_in(&panel)?;
            let result = panel.upload_firmware(&file).await;
            let state = panel.state();
            println!("{} {}", state.firmware.bar_text, state.firmware.log);
            result?;
        }
    }

    Ok(())
}

fn ensure_logged_in(panel: &ControlPanel) -> anyhow::Result<()> {
    if !panel.is_authenticated() {
        bail!("Not logged in, run `parola-panel login` first");
    }
    Ok(())
}

fn print_toast(panel: &ControlPanel) {
    if let Some(toast) = panel.state().toaster.last() {
        println!("{}", toast);
    }
}

async fn set_slider(panel: &ControlPanel, kind: SliderKind, value: i64) -> anyhow::Result<()> {
    ensure_logged_in(panel)?;
    panel.set_slider_value(kind, value).await?;
    print_toast(panel);
    Ok(())
}

async fn watch(panel: &ControlPanel) -> anyhow::Result<()> {
    let mut renders = panel.subscribe();
    let poller = panel.start().await;
    info!("watching {} (Ctrl-C to stop)", panel.client().base_url());
    println!("{}", panel.view());

    loop {
        tokio::select! {
            changed = renders.changed() => {
                if changed.is_err() {
                    break;
                }
                println!("{}", panel.view());
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    poller.abort();
    Ok(())
}
