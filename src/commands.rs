use crate::{OutputMode, emit_success};
use owo_colors::OwoColorize;
use registrar::config::{self, RegistrarConfig};
use registrar::menu::Menu;
use registrar::session::describe_error;
use registrar::ui::{Icons, Tone, header, info, success};
use registrar::{Reply, Session, snapshot};
use std::path::{Path, PathBuf};

/// Resolved settings shared by every snapshot-backed command
pub struct Context {
    pub output_mode: OutputMode,
    pub data_path: PathBuf,
    pub config: RegistrarConfig,
}

impl Context {
    pub fn load(
        output_mode: OutputMode,
        data: Option<PathBuf>,
        config_path: &Path,
    ) -> anyhow::Result<Self> {
        let config = config::load_config(Some(config_path))?.unwrap_or_default();
        let data_path = config.data_path(data.as_deref());
        Ok(Self {
            output_mode,
            data_path,
            config,
        })
    }

    /// Load the snapshot; a missing file gives an empty session
    fn open_session(&self) -> anyhow::Result<Session> {
        let store = snapshot::load_if_exists(&self.data_path)?.unwrap_or_default();
        Ok(Session::with_store(store, &self.data_path))
    }
}

pub fn run_version(output_mode: OutputMode) -> anyhow::Result<()> {
    if output_mode.is_human() {
        println!(
            "{} {} {}",
            Icons::BOOKS,
            registrar::ui::theme().paint(Tone::Title, "Registrar"),
            format!("Version {}", env!("CARGO_PKG_VERSION")).bold()
        );
    } else {
        let data = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
        });
        emit_success(output_mode, "version", data)?;
    }
    Ok(())
}

pub fn run_init(
    output_mode: OutputMode,
    config_path: &Path,
    data_file: &str,
    force: bool,
) -> anyhow::Result<()> {
    let config = RegistrarConfig {
        data_file: Some(data_file.to_string()),
        autosave: Some(true),
        load_on_start: Some(true),
    };
    config::write_config(config_path, &config, force)?;

    let project_root = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    config::ensure_gitignore(project_root, data_file)?;

    if output_mode.is_human() {
        success(&format!("Wrote {}", config_path.display()));
        info("Snapshot file", data_file);
    } else {
        let data = serde_json::json!({
            "config": config_path.display().to_string(),
            "data_file": data_file,
        });
        emit_success(output_mode, "init", data)?;
    }
    Ok(())
}

/// Interactive menu on stdin
pub fn run_menu(ctx: &Context) -> anyhow::Result<()> {
    if !ctx.output_mode.is_human() {
        anyhow::bail!("The interactive menu is only available in human mode.");
    }

    // A corrupt snapshot aborts here so autosave can never overwrite it
    let session = if ctx.config.load_on_start() {
        let (session, reply) = Session::open(&ctx.data_path)?;
        registrar::ui::show_reply(&reply);
        session
    } else {
        Session::new(&ctx.data_path)
    };

    let issues = session.store().check_links();
    if !issues.is_empty() {
        tracing::warn!(count = issues.len(), "Snapshot has inconsistent enrollments");
    }

    header(&format!("Records: {}", ctx.data_path.display()));
    let stdin = std::io::stdin();
    let mut menu = Menu::new(session, stdin.lock(), ctx.config.autosave());
    menu.run()
}

/// Load, apply one change, save
pub fn mutate<F>(ctx: &Context, command: &str, action: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut Session) -> registrar::Result<Reply>,
{
    let mut session = ctx.open_session()?;
    let reply = action(&mut session).map_err(|e| anyhow::anyhow!(describe_error(&e)))?;
    session.save(None)?;
    emit_reply(ctx.output_mode, command, &reply)
}

/// Load and show, never writes
pub fn view<F>(ctx: &Context, command: &str, action: F) -> anyhow::Result<()>
where
    F: FnOnce(&Session) -> registrar::Result<Reply>,
{
    let session = ctx.open_session()?;
    let reply = action(&session).map_err(|e| anyhow::anyhow!(describe_error(&e)))?;
    emit_reply(ctx.output_mode, command, &reply)
}

/// Link audit; exits non-zero when anything is inconsistent
pub fn run_check(ctx: &Context) -> anyhow::Result<()> {
    let session = ctx.open_session()?;
    let reply = session.check();
    emit_reply(ctx.output_mode, "check", &reply)?;
    if let Reply::Issues(issues) = &reply {
        if !issues.is_empty() {
            anyhow::bail!("{} inconsistent enrollment link(s)", issues.len());
        }
    }
    Ok(())
}

fn emit_reply(output_mode: OutputMode, command: &str, reply: &Reply) -> anyhow::Result<()> {
    if output_mode.is_human() {
        registrar::ui::show_reply(reply);
        Ok(())
    } else {
        emit_success(output_mode, command, serde_json::to_value(reply)?)
    }
}
