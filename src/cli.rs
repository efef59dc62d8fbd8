use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use splace_core::{
    app::{Action, AuthChange, Confirm, Level, MemoryHistory, MyPage, MyTab, Page, Route, Store},
    entities::*,
    usecases::{NewAccount, ProfileUpdate},
    util::validate::CommentDraft,
};
use splace_gateways::{HostedBackend, SessionStore};
use std::{
    fs,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use crate::{browse, config::Config, view};

#[derive(Parser)]
#[command(
    name = "splace",
    version,
    about = "Find study places, scrap them and share your experience"
)]
pub struct Args {
    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Browse interactively (default)
    Browse {
        /// Location to start with
        #[arg(default_value = "/")]
        url: String,
    },
    /// List places, best rated first
    Places {
        #[arg(long)]
        category: Option<String>,
        #[arg(long = "type")]
        place_type: Option<String>,
    },
    /// Show a place and its comments
    Detail {
        place_id: String,
        /// Only show comments with at least this many stars
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        min_stars: Option<u8>,
    },
    /// Sign in with email and password or a third party provider
    SignIn {
        #[arg(required_unless_present = "with")]
        email: Option<String>,
        /// github, google or kakao
        #[arg(long)]
        with: Option<OAuthProvider>,
    },
    /// Complete a third party sign-in with the URL you were redirected to
    Callback { url: String },
    /// Create a new account
    SignUp {
        email: String,
        nickname: String,
        /// 중고등학생, 수험생, 대학생, 고시생 or 직장인
        user_type: String,
    },
    SignOut,
    /// Show your profile, scrapped places or comments
    My {
        #[arg(value_enum, default_value_t = TabArg::Profile)]
        tab: TabArg,
    },
    /// Comment on a place
    Comment {
        place_id: String,
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        stars: u8,
        body: String,
        #[arg(long, default_value = "")]
        title: String,
    },
    /// Edit one of your comments
    EditComment {
        place_id: String,
        comment_id: String,
        #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
        stars: u8,
        body: String,
        #[arg(long, default_value = "")]
        title: String,
    },
    /// Delete one of your comments
    DeleteComment {
        place_id: String,
        comment_id: String,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Scrap a place or remove the scrap
    Scrap { place_id: String },
    /// Update your profile
    Profile {
        #[arg(long)]
        nickname: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        user_type: Option<String>,
        /// Image file to upload as avatar
        #[arg(long, value_name = "FILE")]
        avatar: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TabArg {
    Profile,
    Scrapped,
    Comments,
}

impl From<TabArg> for MyTab {
    fn from(from: TabArg) -> Self {
        match from {
            TabArg::Profile => Self::Profile,
            TabArg::Scrapped => Self::Scrapped,
            TabArg::Comments => Self::Comments,
        }
    }
}

/// Asks on the terminal.
pub struct Prompt;

impl Confirm for Prompt {
    fn confirm(&mut self, question: &str) -> bool {
        match read_line(&format!("{question} [y/N] ")) {
            Ok(answer) => matches!(answer.trim(), "y" | "Y" | "yes"),
            Err(err) => {
                log::warn!("Unable to read the answer: {err}");
                false
            }
        }
    }
}

pub fn read_line(prompt: &str) -> io::Result<String> {
    let mut stderr = io::stderr();
    stderr.write_all(prompt.as_bytes())?;
    stderr.flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

fn draft(stars: u8, title: String, body: String) -> CommentDraft {
    CommentDraft {
        rating: StarRating::from_stars(stars),
        title,
        body,
    }
}

pub fn run(args: Args) -> Result<()> {
    let Args { config, command } = args;
    let cfg = Config::try_load_from_file_or_default(config.as_deref())?;
    let sessions = SessionStore::try_new(&cfg.session.dir)?;
    log::debug!("Sessions are stored in {}", sessions.path().display());
    let backend = HostedBackend::try_new(cfg.backend_config(), sessions)?;
    let settings = cfg.settings();

    let open = |url: String| {
        let mut store = Store::new(settings.clone(), MemoryHistory::new(url));
        store.dispatch(&backend, &mut Prompt, Action::Mount);
        store
    };
    let dispatch = |store: &mut Store, action: Action| {
        store.dispatch(&backend, &mut Prompt, action);
    };

    let command = command.unwrap_or(Command::Browse { url: "/".into() });
    let mut store = match command {
        Command::Browse { url } => return browse::run(&backend, settings.clone(), &url),
        Command::Places {
            category,
            place_type,
        } => {
            let filter = PlaceFilter::new(category.as_deref(), place_type.as_deref());
            open(Route::Home(filter).to_url())
        }
        Command::Detail {
            place_id,
            min_stars,
        } => {
            let mut store = open(Route::PlaceDetail(place_id.into()).to_url());
            if let Some(stars) = min_stars {
                dispatch(&mut store, Action::SetMinRating(StarRating::from_stars(stars)));
            }
            store
        }
        Command::SignIn { email, with } => {
            let mut store = open(Route::SignIn.to_url());
            match (with, email) {
                (Some(provider), _) => {
                    dispatch(&mut store, Action::SignInWithOAuth(provider));
                }
                (None, Some(email)) => {
                    let password = read_line("Password: ")?;
                    dispatch(&mut store, Action::SignIn { email, password });
                }
                (None, None) => bail!("Missing email address"),
            }
            store
        }
        Command::Callback { url } => {
            let mut store = open(Route::SignIn.to_url());
            let session = backend.sign_in_with_redirect(&url)?;
            dispatch(&mut store, Action::AuthChanged(AuthChange::SignedIn(session)));
            store
        }
        Command::SignUp {
            email,
            nickname,
            user_type,
        } => {
            let mut store = open(Route::SignUp.to_url());
            let password = read_line("Password: ")?;
            let account = NewAccount {
                email,
                password,
                nickname,
                user_type,
            };
            dispatch(&mut store, Action::SignUp(account));
            store
        }
        Command::SignOut => {
            let mut store = open(Route::home().to_url());
            dispatch(&mut store, Action::SignOut);
            store
        }
        Command::My { tab } => open(Route::My(tab.into()).to_url()),
        Command::Comment {
            place_id,
            stars,
            body,
            title,
        } => {
            let mut store = open(Route::PlaceDetail(place_id.into()).to_url());
            dispatch(&mut store, Action::EditDraft(draft(stars, title, body)));
            dispatch(&mut store, Action::SubmitComment);
            store
        }
        Command::EditComment {
            place_id,
            comment_id,
            stars,
            body,
            title,
        } => {
            let mut store = open(Route::PlaceDetail(place_id.into()).to_url());
            dispatch(&mut store, Action::StartEditing(comment_id.into()));
            dispatch(&mut store, Action::EditComment(draft(stars, title, body)));
            dispatch(&mut store, Action::SaveComment);
            store
        }
        Command::DeleteComment {
            place_id,
            comment_id,
            yes,
        } => {
            let mut store = open(Route::PlaceDetail(place_id.into()).to_url());
            let action = Action::DeleteComment(comment_id.into());
            if yes {
                store.dispatch(&backend, &mut |_: &str| true, action);
            } else {
                dispatch(&mut store, action);
            }
            store
        }
        Command::Scrap { place_id } => {
            let mut store = open(Route::PlaceDetail(place_id.into()).to_url());
            dispatch(&mut store, Action::ToggleScrap);
            store
        }
        Command::Profile {
            nickname,
            email,
            user_type,
            avatar,
        } => {
            let mut store = open(Route::My(MyTab::Profile).to_url());
            if nickname.is_some() || email.is_some() || user_type.is_some() {
                let update = match store.page() {
                    Page::My(MyPage {
                        profile: Some(profile),
                        ..
                    }) => Some(ProfileUpdate::from(profile)),
                    _ => None,
                };
                let Some(mut update) = update else {
                    finish(&mut store)?;
                    bail!("Your profile is not available");
                };
                update.nickname = nickname.unwrap_or(update.nickname);
                update.email = email.unwrap_or(update.email);
                update.user_type = user_type.unwrap_or(update.user_type);
                dispatch(&mut store, Action::UpdateProfile(update));
            }
            if let Some(path) = avatar {
                let (file_name, data) = read_image(&path)?;
                dispatch(&mut store, Action::UploadAvatar { file_name, data });
            }
            store
        }
    };
    finish(&mut store)
}

fn read_image(path: &Path) -> Result<(String, Vec<u8>)> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("Invalid file name: {}", path.display()))?
        .to_owned();
    let data = fs::read(path)?;
    Ok((file_name, data))
}

/// Prints the page and all pending notices.
///
/// Fails if one of the notices reports an error.
fn finish(store: &mut Store) -> Result<()> {
    println!("{}", view::render(store));
    if let Some(url) = store.take_external_url() {
        println!("Open the following URL to continue:\n{url}");
        println!("Then run `splace callback <URL>` with the URL you were redirected to.");
    }
    let mut failed = false;
    for notice in store.take_notices() {
        failed |= notice.level == Level::Error;
        eprintln!("{}", view::render_notice(&notice));
    }
    if failed {
        bail!("The command failed");
    }
    Ok(())
}
