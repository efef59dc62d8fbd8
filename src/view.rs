//! Plain text rendering of the pages.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use splace_core::{
    app::{
        comment_thread::Entry, CommentThread, DetailPage, Level, MyPage, MyTab, Notice, Page,
        Store,
    },
    entities::*,
};
use std::fmt::Write;

const MAP_SEARCH_URL: &str = "https://map.kakao.com/link/search/";

// Characters that stay unescaped in a URI component
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn render<H>(store: &Store<H>) -> String
where
    H: splace_core::app::History,
{
    let mut out = String::new();
    let signed_in = store.session().is_authenticated();
    let _ = writeln!(
        out,
        "[{}]{}",
        store.location(),
        if signed_in { " (signed in)" } else { "" }
    );
    match store.page() {
        Page::Blank => {}
        Page::Home => render_places(&mut out, store),
        Page::Detail(detail) => render_detail(&mut out, detail, store.session().user_id()),
        Page::SignIn => out.push_str("Sign in with your email address and password.\n"),
        Page::SignUp => out.push_str("Create a new account.\n"),
        Page::My(page) => render_my_page(&mut out, page),
        Page::NotFound => out.push_str("Nothing found here.\n"),
    }
    out
}

pub fn render_notice(notice: &Notice) -> String {
    let prefix = match notice.level {
        Level::Info => "info",
        Level::Success => "ok",
        Level::Warning => "warning",
        Level::Error => "error",
    };
    format!("{prefix}: {}", notice.message)
}

fn render_places<H>(out: &mut String, store: &Store<H>)
where
    H: splace_core::app::History,
{
    let filter = store.filter();
    if let Some(category) = &filter.category {
        let _ = writeln!(out, "Category: {category}");
    }
    if let Some(place_type) = &filter.place_type {
        let _ = writeln!(out, "Type: {place_type}");
    }
    let places = store.places().places();
    if places.is_empty() {
        out.push_str("No places found.\n");
    }
    for place in places {
        render_place_line(out, place);
    }
}

fn render_place_line(out: &mut String, place: &Place) {
    let _ = writeln!(
        out,
        "{:>4.1}  {}  [{} / {}]  ({})",
        place.rating, place.name, place.category, place.place_type, place.id
    );
}

/// Edit and delete controls are offered for the comments of the signed in user.
fn render_detail(out: &mut String, detail: &DetailPage, user_id: Option<&Id>) {
    let DetailPage {
        place,
        thread,
        scrap,
        min_rating,
        ..
    } = detail;
    let _ = writeln!(out, "{} ({:.1})", place.name, place.rating);
    let _ = writeln!(out, "{} / {}", place.category, place.place_type);
    let optional = [
        ("Address", &place.address),
        ("Opening hours", &place.operating_hours),
        ("Contact", &place.contact),
        ("Fee", &place.fee),
        ("Website", &place.website_url),
        ("Notes", &place.notes),
    ];
    for (label, value) in optional {
        if let Some(value) = value {
            let _ = writeln!(out, "{label}: {value}");
        }
    }
    if let Some(address) = place.address.as_deref().filter(|a| !a.trim().is_empty()) {
        let _ = writeln!(out, "Map: {}", map_search_url(address));
    }
    match scrap.is_scrapped() {
        Some(true) => out.push_str("Scrapped\n"),
        Some(false) => out.push_str("Not scrapped\n"),
        None => {}
    }
    out.push('\n');
    if let Some(min_rating) = min_rating {
        let _ = writeln!(out, "Comments with at least {} stars", min_rating.stars());
    }
    if thread.entries().is_empty() {
        out.push_str("No comments yet.\n");
    }
    for entry in thread.entries() {
        render_entry(out, entry, CommentThread::can_modify(&entry.comment, user_id));
    }
}

fn map_search_url(address: &str) -> String {
    format!(
        "{MAP_SEARCH_URL}{}",
        utf8_percent_encode(address, URI_COMPONENT)
    )
}

fn render_entry(out: &mut String, entry: &Entry, modifiable: bool) {
    let Comment {
        id,
        rating,
        title,
        body,
        created_at,
        author,
        ..
    } = &entry.comment;
    let pending = if entry.is_pending() { " (saving...)" } else { "" };
    let actions = if modifiable { "  [edit/delete]" } else { "" };
    let _ = writeln!(
        out,
        "{} {}  {}{pending}  ({id}){actions}",
        rating.to_emoji(),
        author.nickname,
        created_at.display_local(),
    );
    if !title.is_empty() {
        let _ = writeln!(out, "  {title}");
    }
    for line in body.lines() {
        let _ = writeln!(out, "  {line}");
    }
}

fn render_my_page(out: &mut String, page: &MyPage) {
    if let Some(profile) = &page.profile {
        let _ = writeln!(out, "{} <{}>", profile.nickname, profile.email);
    }
    match page.tab {
        MyTab::Profile => {
            if let Some(profile) = &page.profile {
                let _ = writeln!(out, "Type: {}", profile.user_type);
                let _ = writeln!(out, "Avatar: {}", profile.avatar_url);
                let _ = writeln!(out, "Member since {}", profile.created_at.display_local());
            }
        }
        MyTab::Scrapped => {
            if page.scrapped.is_empty() {
                out.push_str("No scrapped places.\n");
            }
            for place in &page.scrapped {
                render_place_line(out, place);
            }
        }
        MyTab::Comments => {
            if page.comments.is_empty() {
                out.push_str("No comments.\n");
            }
            for (comment, place) in &page.comments {
                let place = place.as_ref().map(|p| p.name.as_str()).unwrap_or("?");
                let _ = writeln!(
                    out,
                    "{} {place}  {}  ({})",
                    comment.rating.to_emoji(),
                    comment.created_at.display_local(),
                    comment.id
                );
                let _ = writeln!(out, "  {}", comment.body);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use splace_core::app::{comment_thread::EntryStatus, scrap_toggle::ScrapToggle};

    #[test]
    fn render_notices() {
        let notice = Notice {
            level: Level::Warning,
            message: "Partially saved".into(),
        };
        assert_eq!("warning: Partially saved", render_notice(&notice));
    }

    fn comment(user_id: &str) -> Entry {
        Entry {
            comment: Comment {
                id: "c1".into(),
                place_id: "p1".into(),
                user_id: user_id.into(),
                rating: StarRating::Three,
                title: String::new(),
                body: "great desks".into(),
                created_at: Timestamp::from_secs(0).unwrap(),
                author: Author {
                    nickname: "kim".into(),
                    avatar_url: None,
                },
            },
            status: EntryStatus::Committed,
        }
    }

    #[test]
    fn edit_controls_only_for_authors() {
        let mut out = String::new();
        render_entry(&mut out, &comment("u1"), true);
        assert!(out.contains("[edit/delete]"));
        assert!(out.contains("  great desks\n"));
        let mut out = String::new();
        render_entry(&mut out, &comment("u2"), false);
        assert!(!out.contains("[edit/delete]"));
    }

    #[test]
    fn edit_controls_follow_the_session() {
        let mut place = place();
        place.address = Some("서울 마포구 1".into());
        let detail = DetailPage {
            thread: CommentThread::new(place.id.clone(), vec![comment("u9").comment]),
            scrap: ScrapToggle::new(place.id.clone()),
            place,
            min_rating: None,
            // no profile row for the signed in user
            viewer: None,
        };
        let mut out = String::new();
        render_detail(&mut out, &detail, Some(&"u9".into()));
        assert!(out.contains("[edit/delete]"));
        assert!(out.contains(
            "Map: https://map.kakao.com/link/search/%EC%84%9C%EC%9A%B8%20%EB%A7%88%ED%8F%AC%EA%B5%AC%201\n"
        ));

        let mut out = String::new();
        render_detail(&mut out, &detail, Some(&"u1".into()));
        assert!(!out.contains("[edit/delete]"));
        let mut out = String::new();
        render_detail(&mut out, &detail, None);
        assert!(!out.contains("[edit/delete]"));
    }

    #[test]
    fn map_link_keeps_unreserved_characters() {
        assert_eq!(
            "https://map.kakao.com/link/search/Main%20St.%20(2F)%2C%20No*1",
            map_search_url("Main St. (2F), No*1")
        );
    }

    fn place() -> Place {
        Place {
            id: "p1".into(),
            category: "Cafe".into(),
            place_type: "Quiet".into(),
            name: "Bean Desk".into(),
            photo_url: None,
            rating: 4.5,
            address: None,
            operating_hours: None,
            contact: None,
            fee: None,
            website_url: None,
            notes: None,
        }
    }

    #[test]
    fn render_place() {
        let mut out = String::new();
        render_place_line(&mut out, &place());
        assert_eq!(" 4.5  Bean Desk  [Cafe / Quiet]  (p1)\n", out);
    }
}
