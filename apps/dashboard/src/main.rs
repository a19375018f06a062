mod config;
mod render;

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{anyhow, bail, Context, Result};
use catalog::Catalog;
use clap::{Parser, Subcommand};
use dashboard_core::{
    profile::ProfileEditor, releases::ReleaseBrowser, revenue::RevenueBrowser, DashboardOverview,
    MediaBlob, MockAuthProvider, ReleaseColumn, RevenueColumn, Route, Session, Shell,
    SortDirection, SortSpec, StatusFilter, Timeframe, WizardController, WizardEvent, WizardState,
};
use serde::Serialize;
use shared::domain::{parse_iso_date, Genre, PlatformId, ReleaseId};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info};

use config::{load_settings, Settings};

#[derive(Parser, Debug)]
#[command(about = "Artist distribution dashboard")]
struct Cli {
    /// Catalog json file; overrides the configured path.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    #[arg(long, global = true, default_value = "artist@example.com")]
    email: String,
    #[arg(long, global = true, default_value = "demo")]
    password: String,
    /// Print json instead of text.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Overview,
    Releases {
        #[arg(long, default_value = "all")]
        status: StatusFilter,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        sort: Option<ReleaseColumn>,
        #[arg(long, default_value = "desc")]
        direction: SortDirection,
    },
    Release {
        id: i64,
    },
    Revenue {
        #[arg(long, default_value = "last-12-months")]
        timeframe: Timeframe,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "month")]
        sort: RevenueColumn,
        #[arg(long, default_value = "desc")]
        direction: SortDirection,
    },
    Upload(UploadArgs),
    Profile(ProfileArgs),
}

#[derive(clap::Args, Debug)]
struct UploadArgs {
    #[arg(long)]
    cover: PathBuf,
    #[arg(long)]
    audio: PathBuf,
    #[arg(long)]
    title: String,
    #[arg(long)]
    artist: String,
    #[arg(long)]
    album: Option<String>,
    #[arg(long)]
    genre: Option<Genre>,
    /// YYYY-MM-DD
    #[arg(long)]
    release_date: Option<String>,
    #[arg(long)]
    explicit: bool,
    /// Flips a platform relative to the default selection; repeatable.
    #[arg(long = "toggle-platform")]
    toggle_platforms: Vec<PlatformId>,
    #[arg(long)]
    accept_agreement: bool,
    /// Cancels the upload once progress reaches this percentage.
    #[arg(long)]
    cancel_at: Option<u8>,
}

#[derive(clap::Args, Debug)]
struct ProfileArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    bio: Option<String>,
    #[arg(long)]
    genre: Option<Genre>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    website: Option<String>,
    /// INDEX=URL; repeatable.
    #[arg(long = "social")]
    social: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = load_settings();
    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .init();
    debug!(?settings, "settings loaded");

    let catalog_path = cli.catalog.clone().or_else(|| settings.catalog_path.clone());
    let catalog = Catalog::load(catalog_path.as_deref())?;

    let mut session = Session::new(Arc::new(MockAuthProvider));
    session
        .sign_in(&cli.email, &cli.password)
        .await
        .context("sign-in failed")?;
    let mut shell = Shell::default();

    match cli.command {
        Command::Overview => {
            open(&mut shell, Route::Dashboard, &session)?;
            let overview = DashboardOverview::build(&catalog, session.user());
            emit(cli.json, &overview, render::overview)?;
        }
        Command::Releases {
            status,
            search,
            sort,
            direction,
        } => {
            open(&mut shell, Route::Status, &session)?;
            let mut browser = ReleaseBrowser::new(catalog.releases().to_vec());
            browser.set_filter(status);
            browser.set_search(search);
            browser.set_sort(sort.map(|column| SortSpec::new(column, direction)));
            let rows = browser.rows();
            emit(cli.json, &rows, |rows| {
                render::releases(rows, browser.empty_message())
            })?;
        }
        Command::Release { id } => {
            open(&mut shell, Route::Status, &session)?;
            let mut browser = ReleaseBrowser::new(catalog.releases().to_vec());
            let detail = browser
                .select(ReleaseId(id))
                .ok_or_else(|| anyhow!("release {id} not found"))?;
            emit(cli.json, &detail, render::release_detail)?;
        }
        Command::Revenue {
            timeframe,
            search,
            sort,
            direction,
        } => {
            open(&mut shell, Route::Revenue, &session)?;
            let mut browser = RevenueBrowser::new(catalog.revenue().to_vec());
            browser.set_timeframe(timeframe);
            browser.set_search(search);
            browser.set_sort(SortSpec::new(sort, direction));
            let view = RevenueView {
                timeframe: browser.timeframe().label(),
                rows: browser.rows(),
                report: browser.report(),
            };
            emit(cli.json, &view, |view| {
                render::revenue(view.timeframe, &view.rows, &view.report)
            })?;
        }
        Command::Upload(args) => {
            open(&mut shell, Route::Upload, &session)?;
            let wizard = upload(&settings, args, cli.json).await?;
            emit(cli.json, &UploadOutcome::from(&wizard), render::upload_outcome)?;
        }
        Command::Profile(args) => {
            open(&mut shell, Route::Profile, &session)?;
            let editor = edit_profile(&catalog, &session, args)?;
            emit(cli.json, editor.profile(), render::profile)?;
        }
    }

    Ok(())
}

fn open(shell: &mut Shell, route: Route, session: &Session) -> Result<()> {
    let landed = shell.navigate(route, session);
    if landed != route {
        bail!("{} redirected to {}", route, landed);
    }
    Ok(())
}

fn emit<T: Serialize + ?Sized>(
    json: bool,
    value: &T,
    text: impl FnOnce(&T) -> Result<String, std::fmt::Error>,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text(value).context("failed to render page")?);
    }
    Ok(())
}

#[derive(Serialize)]
struct RevenueView<'a> {
    timeframe: &'static str,
    rows: Vec<&'a shared::records::RevenueRow>,
    report: dashboard_core::RevenueReport,
}

#[derive(Serialize)]
pub(crate) struct UploadOutcome<'a> {
    state: WizardState,
    progress: u8,
    draft: &'a dashboard_core::UploadDraft,
}

impl<'a> From<&'a WizardController> for UploadOutcome<'a> {
    fn from(wizard: &'a WizardController) -> Self {
        Self {
            state: wizard.state(),
            progress: wizard.progress(),
            draft: wizard.draft(),
        }
    }
}

fn read_media(path: &Path) -> Result<MediaBlob> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read '{}'", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(MediaBlob::new(file_name, bytes))
}

async fn upload(settings: &Settings, args: UploadArgs, json: bool) -> Result<WizardController> {
    let mut wizard = WizardController::new(settings.upload_simulation());
    let cover = read_media(&args.cover)?;
    let audio = read_media(&args.audio)?;
    let release_date = args
        .release_date
        .as_deref()
        .map(parse_iso_date)
        .transpose()?;

    let (cover_ok, audio_ok) = wizard.edit(|draft| {
        (draft.drop_cover(cover), draft.drop_audio(audio))
    })?;
    if !cover_ok {
        bail!("'{}' is not an image", args.cover.display());
    }
    if !audio_ok {
        bail!("'{}' is not an audio file", args.audio.display());
    }
    wizard.advance()?;

    wizard.edit(|draft| {
        draft.title = args.title;
        draft.artist = args.artist;
        draft.set_album(args.album.unwrap_or_default());
        draft.genre = args.genre;
        draft.release_date = release_date;
        draft.explicit = args.explicit;
    })?;
    wizard.advance()?;

    wizard.edit(|draft| {
        for platform in &args.toggle_platforms {
            draft.toggle_platform(*platform);
        }
        draft.agreement_accepted = args.accept_agreement;
    })?;

    let mut events = wizard.subscribe();
    wizard.submit()?;
    let printer = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(WizardEvent::UploadProgress(progress)) if !json => {
                    println!("uploading... {progress}%");
                }
                Ok(WizardEvent::Completed | WizardEvent::UploadCancelled) | Err(RecvError::Closed) => {
                    break
                }
                Ok(_) | Err(RecvError::Lagged(_)) => {}
            }
        }
    });

    match args.cancel_at {
        Some(limit) => {
            while wizard.next_upload_event().await.is_some() {
                if wizard.is_uploading() && wizard.progress() >= limit {
                    wizard.cancel_upload();
                }
            }
        }
        None => {
            wizard.run_upload().await;
        }
    }
    printer.await.context("progress printer failed")?;

    info!(state = ?wizard.state(), "upload wizard finished");
    Ok(wizard)
}

fn edit_profile(catalog: &Catalog, session: &Session, args: ProfileArgs) -> Result<ProfileEditor> {
    let mut editor = ProfileEditor::new(catalog.profile().clone(), session.user());
    let has_edits = args.name.is_some()
        || args.bio.is_some()
        || args.genre.is_some()
        || args.location.is_some()
        || args.website.is_some()
        || !args.social.is_empty();
    if !has_edits {
        return Ok(editor);
    }

    editor.toggle_editing();
    if let Some(name) = args.name {
        editor.set_name(name)?;
    }
    if let Some(bio) = args.bio {
        editor.set_bio(bio)?;
    }
    if let Some(genre) = args.genre {
        editor.set_genre(genre)?;
    }
    if let Some(location) = args.location {
        editor.set_location(location)?;
    }
    if let Some(website) = args.website {
        editor.set_website(website)?;
    }
    for entry in args.social {
        let (index, url) = entry
            .split_once('=')
            .ok_or_else(|| anyhow!("expected INDEX=URL, got '{entry}'"))?;
        let index: usize = index
            .trim()
            .parse()
            .with_context(|| format!("invalid social link index in '{entry}'"))?;
        editor.set_social_url(index, url.trim())?;
    }
    editor.toggle_editing();
    Ok(editor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_release_table_arguments() {
        let cli = Cli::try_parse_from([
            "dashboard", "releases", "--status", "live", "--sort", "release-date", "--direction",
            "asc", "--json",
        ])
        .expect("parse");
        assert!(cli.json);
        match cli.command {
            Command::Releases {
                status,
                sort,
                direction,
                ..
            } => {
                assert_eq!(status, StatusFilter::Only(shared::domain::ReleaseStatus::Live));
                assert_eq!(sort, Some(ReleaseColumn::ReleaseDate));
                assert_eq!(direction, SortDirection::Ascending);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_revenue_timeframe() {
        assert!(Cli::try_parse_from(["dashboard", "revenue", "--timeframe", "forever"]).is_err());
    }

    #[tokio::test]
    async fn profile_edits_are_saved() {
        let mut session = Session::new(Arc::new(MockAuthProvider));
        session
            .sign_in("nova@example.com", "pw")
            .await
            .expect("sign in");
        let args = ProfileArgs {
            name: None,
            bio: None,
            genre: Some(Genre::Jazz),
            location: None,
            website: None,
            social: vec!["0=https://instagram.com/nova".into()],
        };
        let editor = edit_profile(&Catalog::fixture(), &session, args).expect("edit");
        assert!(!editor.is_editing());
        assert_eq!(editor.profile().name, "Nova");
        assert_eq!(editor.profile().genre, "Jazz");
        assert_eq!(editor.profile().social_links[0].url, "https://instagram.com/nova");
    }

    fn upload_args(name: &str, cancel_at: Option<u8>) -> UploadArgs {
        let dir = std::env::temp_dir().join(format!("dashboard-{name}-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");
        let cover = dir.join("cover.jpg");
        let audio = dir.join("master.wav");
        fs::write(&cover, [0xFF, 0xD8]).expect("cover");
        fs::write(&audio, [0u8; 64]).expect("audio");
        UploadArgs {
            cover,
            audio,
            title: "Electric Dreams".into(),
            artist: "Nova".into(),
            album: None,
            genre: None,
            release_date: None,
            explicit: false,
            toggle_platforms: vec![],
            accept_agreement: true,
            cancel_at,
        }
    }

    fn fast_settings() -> Settings {
        Settings {
            upload_tick_ms: 1,
            upload_step: 20,
            upload_finalize_ms: 1,
            ..Settings::default()
        }
    }

    #[tokio::test]
    async fn upload_command_runs_to_completion() {
        let wizard = tokio::time::timeout(
            std::time::Duration::from_secs(10),
            upload(&fast_settings(), upload_args("complete", None), true),
        )
        .await
        .expect("printer and upload finish")
        .expect("upload");
        assert_eq!(wizard.state(), WizardState::Complete);
        assert_eq!(wizard.progress(), 100);
    }

    #[tokio::test]
    async fn upload_command_cancels_at_threshold() {
        let wizard = tokio::time::timeout(
            std::time::Duration::from_secs(10),
            upload(&fast_settings(), upload_args("cancel", Some(40)), true),
        )
        .await
        .expect("printer and upload finish")
        .expect("upload");
        assert_eq!(wizard.state(), WizardState::CollectDistribution);
        assert_eq!(wizard.progress(), 0);
        assert!(!wizard.is_uploading());
    }

    #[tokio::test]
    async fn upload_command_requires_agreement() {
        let mut args = upload_args("agreement", None);
        args.accept_agreement = false;
        let err = upload(&fast_settings(), args, true)
            .await
            .err()
            .expect("agreement missing");
        assert!(err.to_string().contains("agreement"));
    }

    #[test]
    fn rendered_upload_outcome_lists_platforms() {
        let wizard = WizardController::default();
        let text = render::upload_outcome(&UploadOutcome::from(&wizard)).expect("render");
        assert!(text.starts_with("Upload Files (0%)"));
        assert!(text.contains("Platforms: "));
    }

    #[tokio::test]
    async fn guarded_routes_fail_without_session() {
        let session = Session::new(Arc::new(MockAuthProvider));
        let mut shell = Shell::default();
        assert!(open(&mut shell, Route::Revenue, &session).is_err());
    }
}
