//! Plain-text rendering of the view models.
//!
//! Used by the demo binary and handy in logs; platform shells bind to the
//! view models instead.

use std::fmt::Write;

use chrono::Utc;

use super::viewmodel::{
    ChatLine, DashboardViewModel, DiscoveryViewModel, EmptyState, GroopRow, MyGroopsViewModel, ScreenViewModel,
};
use crate::app::{AppState, Tab};
use crate::dashboard::UpdateSource;
use crate::domain::time_ago;

/// Renders the screen of the selected tab.
#[must_use]
pub fn render(state: &AppState) -> String {
    match state.tab {
        Tab::Home => render_dashboard(&state.compute_dashboard_viewmodel()),
        Tab::Discover => render_discovery(&state.compute_discovery_viewmodel()),
        Tab::MyGroops => render_my_groops(&state.compute_my_groops_viewmodel()),
    }
}

// write! into a String cannot fail, results are ignored below.

#[must_use]
pub fn render_dashboard(vm: &DashboardViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", vm.greeting);
    let _ = writeln!(
        out,
        "{} joined · {} to discover · {} unread · {} mentions · {} pinned",
        vm.joined_count, vm.discovery_count, vm.counters.unread, vm.counters.mentions, vm.counters.pinned
    );
    if vm.is_loading {
        let _ = writeln!(out, "(refreshing)");
    }
    if let Some(empty) = &vm.empty_state {
        render_empty(&mut out, empty);
        return out;
    }

    let _ = writeln!(out, "\nUpdates [{:?}]", vm.filter);
    let now = Utc::now();
    for update in &vm.updates {
        let tag = match update.source {
            UpdateSource::Announcement => "announcement",
            UpdateSource::Feed => "activity",
            UpdateSource::Message => "message",
        };
        let _ = writeln!(
            out,
            "  [{tag}] {} · {} ({})",
            update.groop_name,
            update.title,
            time_ago(update.created_at, now)
        );
    }

    if !vm.threads.is_empty() {
        let _ = writeln!(out, "\nChats");
        for thread in &vm.threads {
            let marker = match (thread.is_unread, thread.has_mention) {
                (_, true) => "@",
                (true, false) => "*",
                (false, false) => " ",
            };
            let _ = writeln!(
                out,
                " {marker} {} · {}: {}",
                thread.groop_name, thread.sender_name, thread.preview
            );
        }
    }
    out
}

#[must_use]
pub fn render_discovery(vm: &DiscoveryViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Discover [{:?}] search={:?} category={} sort={:?}",
        vm.mode, vm.query, vm.category, vm.sort
    );
    let _ = writeln!(out, "categories: {}", vm.category_chips.join(" | "));
    let _ = writeln!(
        out,
        "camera ({:.4}, {:.4}) span {:.2} · sheet {:?} offset {:.0} visible {:.0} controls {:.0}",
        vm.camera.center.latitude,
        vm.camera.center.longitude,
        vm.camera.span,
        vm.sheet.detent,
        vm.sheet.offset,
        vm.sheet.visible_height,
        vm.sheet.controls_y
    );
    if let Some(empty) = &vm.empty_state {
        render_empty(&mut out, empty);
        return out;
    }

    if !vm.featured.is_empty() {
        let names: Vec<&str> = vm.featured.iter().map(|row| row.name.as_str()).collect();
        let _ = writeln!(out, "Featured: {}", names.join(", "));
    }
    let _ = writeln!(out, "{} of {} matches", vm.rows.len(), vm.total_matches);
    for row in &vm.rows {
        render_row(&mut out, row);
    }
    out
}

#[must_use]
pub fn render_my_groops(vm: &MyGroopsViewModel) -> String {
    let mut out = String::new();
    let chips: Vec<String> = vm
        .categories
        .iter()
        .map(|category| {
            if *category == vm.selected_category {
                format!("[{category}]")
            } else {
                category.clone()
            }
        })
        .collect();
    let _ = writeln!(out, "My Groops  {}", chips.join(" "));
    let _ = writeln!(out, "search={:?} sort={:?}", vm.query, vm.sort);
    let _ = writeln!(
        out,
        "{} members in total · largest: {}",
        vm.total_members,
        vm.top_groop.as_deref().unwrap_or("-")
    );
    if let Some(empty) = &vm.empty_state {
        render_empty(&mut out, empty);
        return out;
    }
    for row in &vm.rows {
        render_row(&mut out, row);
    }
    out
}

/// Renders a pushed screen.
#[must_use]
pub fn render_screen(vm: &ScreenViewModel) -> String {
    let mut out = String::new();
    match vm {
        ScreenViewModel::Loading(route) => {
            let _ = writeln!(out, "Loading {route:?}…");
        }
        ScreenViewModel::GroopDetail(detail) => {
            let _ = writeln!(out, "{}", detail.groop.name);
            let _ = writeln!(out, "{} · {}", detail.groop.subtitle, detail.groop.member_label);
            let _ = writeln!(out, "members: {}", detail.member_initials.join(" "));
            if !detail.announcements.is_empty() {
                let _ = writeln!(out, "\nAnnouncements");
                for announcement in &detail.announcements {
                    let _ = writeln!(out, "  {}: {}", announcement.title, announcement.body);
                }
            }
            if !detail.feed.is_empty() {
                let _ = writeln!(out, "\nActivity");
                for item in &detail.feed {
                    let _ = writeln!(out, "  {}", item.message);
                }
            }
            if let Some(line) = &detail.latest_message {
                let _ = writeln!(out, "\nLatest chat");
                render_chat_line(&mut out, line);
            }
        }
        ScreenViewModel::Chat(chat) => {
            let _ = writeln!(out, "{} chat", chat.groop_name);
            for line in &chat.lines {
                render_chat_line(&mut out, line);
            }
            let _ = writeln!(out, "> {}", chat.draft);
        }
        ScreenViewModel::Members(members) => {
            let _ = writeln!(out, "{} members", members.groop_name);
            if let Some(host) = &members.host {
                let _ = writeln!(out, "  [{}] {} · {} (host)", host.initials, host.name, host.job_title);
            }
            for member in &members.attendees {
                let _ = writeln!(out, "  [{}] {} · {}", member.initials, member.name, member.job_title);
            }
        }
        ScreenViewModel::Announcement(announcement) => {
            let _ = writeln!(out, "{}", announcement.title);
            if let Some(name) = &announcement.groop_name {
                let _ = writeln!(out, "{name} · {}", announcement.posted);
            }
            let _ = writeln!(out, "\n{}\n\n{} attending", announcement.body, announcement.attendee_count);
        }
    }
    out
}

fn render_chat_line(out: &mut String, line: &ChatLine) {
    let who = if line.is_mine { "you" } else { line.sender.as_str() };
    let _ = writeln!(out, "  {who}: {} ({})", line.body, line.age);
}

fn render_row(out: &mut String, row: &GroopRow) {
    let cursor = if row.is_selected { ">" } else { " " };
    let status = if row.is_joining { " (joining…)" } else { "" };
    let _ = writeln!(out, "{cursor} {} · {} · {}{status}", row.name, row.subtitle, row.member_label);
}

fn render_empty(out: &mut String, empty: &EmptyState) {
    let _ = writeln!(out, "\n  {}\n  {}", empty.message, empty.subtitle);
}
