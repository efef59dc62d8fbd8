//! Interactive navigation through the pages.

use anyhow::Result;
use splace_core::{
    app::{Action, Backend, MemoryHistory, MyTab, Route, Settings, Store},
    entities::*,
    util::validate::CommentDraft,
};
use std::io::{self, BufRead, Write};

use crate::{cli, view};

const HELP: &str = "\
Commands:
  open <url>                    go to a location, e.g. /detail/<id> or /?category=cafe
  home                          list all places
  category <name>               only show places of a category
  type <name>                   only show places of a type
  all                           remove the filter
  place <id>                    show a place
  stars [1-5]                   only show comments with at least that many stars
  comment <1-5> <text>          comment on the current place
  edit <id> <1-5> <text>        edit one of your comments
  delete <id>                   delete one of your comments
  scrap                         scrap the current place or remove the scrap
  my [profile|scrapped|comments]
  signin <email>                sign in, the password is asked for
  signout
  back | forward
  help | quit";

#[derive(Debug)]
enum Input {
    Actions(Vec<Action>),
    SignIn { email: String },
    Help,
    Quit,
}

fn parse_stars(stars: &str) -> Result<StarRating, String> {
    stars
        .parse::<u8>()
        .ok()
        .and_then(StarRating::from_stars)
        .ok_or_else(|| format!("Invalid number of stars: {stars}"))
}

fn comment_draft(stars: &str, body: &str) -> Result<CommentDraft, String> {
    Ok(CommentDraft {
        rating: Some(parse_stars(stars)?),
        title: String::new(),
        body: body.to_owned(),
    })
}

fn parse_input(line: &str) -> Result<Option<Input>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();
    let single = |action| Ok(Some(Input::Actions(vec![action])));
    match (cmd, rest) {
        ("help" | "?", _) => Ok(Some(Input::Help)),
        ("quit" | "exit" | "q", _) => Ok(Some(Input::Quit)),
        ("open", url) if !url.is_empty() => single(Action::Navigate(Route::parse(url))),
        ("home", _) => single(Action::Navigate(Route::home())),
        ("category", name) if !name.is_empty() => single(Action::SelectCategory(name.into())),
        ("type", name) if !name.is_empty() => single(Action::SelectPlaceType(name.into())),
        ("all", _) => single(Action::ShowAll),
        ("place", id) if !id.is_empty() => single(Action::Navigate(Route::PlaceDetail(id.into()))),
        ("stars", "") => single(Action::SetMinRating(None)),
        ("stars", stars) => single(Action::SetMinRating(Some(parse_stars(stars)?))),
        ("comment", args) => {
            let (stars, body) = args.split_once(' ').unwrap_or((args, ""));
            let draft = comment_draft(stars, body.trim())?;
            Ok(Some(Input::Actions(vec![
                Action::EditDraft(draft),
                Action::SubmitComment,
            ])))
        }
        ("edit", args) => {
            let mut parts = args.splitn(3, ' ');
            let (Some(id), Some(stars)) = (parts.next(), parts.next()) else {
                return Err("Usage: edit <id> <1-5> <text>".into());
            };
            let draft = comment_draft(stars, parts.next().unwrap_or_default().trim())?;
            Ok(Some(Input::Actions(vec![
                Action::StartEditing(id.into()),
                Action::EditComment(draft),
                Action::SaveComment,
            ])))
        }
        ("delete", id) if !id.is_empty() => single(Action::DeleteComment(id.into())),
        ("scrap", _) => single(Action::ToggleScrap),
        ("my", tab) => {
            let tab = match tab {
                "" | "profile" => MyTab::Profile,
                "scrapped" => MyTab::Scrapped,
                "comments" => MyTab::Comments,
                tab => return Err(format!("Unknown tab: {tab}")),
            };
            single(Action::Navigate(Route::My(tab)))
        }
        ("signin", email) if !email.is_empty() => Ok(Some(Input::SignIn {
            email: email.into(),
        })),
        ("signout", _) => single(Action::SignOut),
        ("back", _) => single(Action::Back),
        ("forward", _) => single(Action::Forward),
        (cmd, _) => Err(format!("Unknown or incomplete command: {cmd} (try `help`)")),
    }
}

fn show<H>(store: &mut Store<H>)
where
    H: splace_core::app::History,
{
    println!("{}", view::render(store));
    for notice in store.take_notices() {
        println!("{}", view::render_notice(&notice));
    }
    if let Some(url) = store.take_external_url() {
        println!("Open {url}");
    }
}

pub fn run<B: Backend>(backend: &B, settings: Settings, url: &str) -> Result<()> {
    let mut store = Store::new(settings, MemoryHistory::new(url));
    let mut confirm = cli::Prompt;
    store.dispatch(backend, &mut confirm, Action::Mount);
    show(&mut store);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let actions = match parse_input(&line?) {
            Ok(None) => continue,
            Ok(Some(Input::Quit)) => break,
            Ok(Some(Input::Help)) => {
                println!("{HELP}");
                continue;
            }
            Ok(Some(Input::SignIn { email })) => {
                let password = cli::read_line("Password: ")?;
                vec![Action::SignIn { email, password }]
            }
            Ok(Some(Input::Actions(actions))) => actions,
            Err(msg) => {
                println!("{msg}");
                continue;
            }
        };
        for action in actions {
            store.dispatch(backend, &mut confirm, action);
        }
        show(&mut store);
    }
    store.dispatch(backend, &mut confirm, Action::Unmount);
    Ok(())
}
