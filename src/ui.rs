use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Paragraph, Widget},
};
use time_humanize::{Accuracy, HumanTime, Tense};
use unicode_width::UnicodeWidthStr;

use crate::effects::EffectKind;
use crate::session::Phase;
use crate::App;

pub const TIGER_WIDTH: u16 = 21;
pub const TIGER_HEIGHT: u16 = 11;

// The tongue cells on the clicked frame sit at rows 9-10 of 11 (72-82%
// down) in the center column, inside the bonus band: what you see is what
// scores double.
const TIGER_IDLE: [&str; 11] = [
    r"   /\___________/\   ",
    r"  /  ^         ^  \  ",
    r" |    o       o    | ",
    r" |        _        | ",
    r"=|=      (_)      =|=",
    r" |                 | ",
    r" |     \     /     | ",
    r"  \     \___/     /  ",
    r"    \           /    ",
    r"     \____|____/     ",
    r"      _/     \_      ",
];

const TIGER_CLICKED: [&str; 11] = [
    r"   /\___________/\   ",
    r"  /  ^         ^  \  ",
    r" |    >       <    | ",
    r" |        _        | ",
    r"=|=      (_)      =|=",
    r" |                 | ",
    r" |      \   /      | ",
    r"  \      \_/      /  ",
    r"    \     U     /    ",
    r"     \____U____/     ",
    r"      _/     \_      ",
];

/// Where the tiger sits: centered horizontally, nudged below the header.
/// Shared with the event loop so clicks hit what the player sees.
pub fn tiger_rect(area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(TIGER_WIDTH) / 2;
    let header = 5;
    let free = area.height.saturating_sub(header + TIGER_HEIGHT);
    let y = area.y + header + free / 2;
    Rect::new(
        x,
        y.min(area.y + area.height.saturating_sub(TIGER_HEIGHT)),
        TIGER_WIDTH.min(area.width),
        TIGER_HEIGHT.min(area.height),
    )
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.game.show_leaderboard {
            render_leaderboard(self, area, buf);
        } else if self.game.session.phase == Phase::Ended {
            render_name_entry(self, area, buf);
        } else {
            render_play(self, area, buf);
        }
    }
}

fn render_play(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);
    let title_style = bold_style.fg(Color::Magenta);
    let score_style = bold_style.fg(Color::Yellow);

    set_centered(buf, area, area.y + 1, "T I G E R P A T", title_style);
    set_centered(
        buf,
        area,
        area.y + 2,
        &format!("Pats: {}", app.game.session.score),
        score_style,
    );

    if app.game.session.is_active() {
        let secs = app.game.session.seconds_remaining;
        set_centered(
            buf,
            area,
            area.y + 3,
            &format!("{}:{:02}", secs / 60, secs % 60),
            bold_style.add_modifier(Modifier::DIM),
        );
    }

    let cat = tiger_rect(area);
    let art = if app.game.click_flash_active(app.now) {
        &TIGER_CLICKED
    } else {
        &TIGER_IDLE
    };
    let art_style = if app.game.is_petting() {
        Style::default().fg(Color::LightYellow)
    } else {
        Style::default().fg(Color::White)
    };
    for (i, line) in art.iter().enumerate() {
        let y = cat.y + i as u16;
        if y < area.y + area.height {
            buf.set_stringn(cat.x, y, line, cat.width as usize, art_style);
        }
    }

    if !app.game.has_interacted && area.height > 3 {
        let italic_dim = dim_style.add_modifier(Modifier::ITALIC);
        set_centered(
            buf,
            area,
            area.y + area.height - 3,
            "click or hold and drag to pet the tiger!",
            italic_dim,
        );
        set_centered(
            buf,
            area,
            area.y + area.height - 2,
            "hit the tongue for +2 bonus pats!",
            italic_dim,
        );
    }

    render_effects(app, area, buf);
}

/// Sparkles and score bumps drawn over everything else, faded by their
/// remaining life.
fn render_effects(app: &App, area: Rect, buf: &mut Buffer) {
    for effect in app.game.effects.iter() {
        let life = effect.remaining_life(app.now);
        match &effect.kind {
            EffectKind::SparkleBurst { sparkles } => {
                for sparkle in sparkles {
                    // fade_delay holds a sparkle at full brightness a beat
                    // longer than its ring-mates
                    let local_life = (life + sparkle.fade_delay).min(1.0);
                    let style = sparkle_style(local_life);
                    let symbol = if local_life > 0.5 { "✦" } else { "·" };
                    set_cell(buf, area, sparkle.pos.x, sparkle.pos.y, symbol, style);
                }
            }
            EffectKind::ScoreBump { points, bonus } => {
                let style = if *bonus {
                    Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                };
                let style = if life < 0.4 {
                    style.add_modifier(Modifier::DIM)
                } else {
                    style
                };
                // drift upwards as the bump ages
                let rise = ((1.0 - life) * 2.0).round();
                set_cell(
                    buf,
                    area,
                    effect.origin.x,
                    effect.origin.y - rise,
                    &format!("+{points}"),
                    style,
                );
            }
        }
    }
}

fn sparkle_style(life: f64) -> Style {
    if life > 0.66 {
        Style::default().fg(Color::LightYellow).add_modifier(Modifier::BOLD)
    } else if life > 0.33 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    }
}

fn render_name_entry(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let mid = area.y + area.height / 2;

    set_centered(
        buf,
        area,
        mid.saturating_sub(3),
        "ROUND COMPLETE!",
        bold_style.fg(Color::Magenta),
    );
    set_centered(
        buf,
        area,
        mid.saturating_sub(2),
        &format!("{} pats", app.game.session.score),
        bold_style.fg(Color::Yellow),
    );
    set_centered(
        buf,
        area,
        mid,
        &format!("name: {}_", app.name_input),
        bold_style,
    );
    set_centered(
        buf,
        area,
        mid + 2,
        "(enter) submit   (esc) skip to leaderboard",
        Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
    );
}

fn render_leaderboard(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);

    let title = if app.game.using_local_scores {
        "TOP PATTERS (this device)"
    } else {
        "TOP PATTERS"
    };
    set_centered(buf, area, area.y + 1, title, bold_style.fg(Color::Magenta));

    if !app.game.leaderboard_loaded {
        set_centered(buf, area, area.y + 4, "Loading scores...", dim_style);
    } else if app.game.leaderboard().is_empty() {
        set_centered(buf, area, area.y + 4, "no pats recorded yet", dim_style);
    } else {
        for (i, entry) in app.game.leaderboard().iter().enumerate() {
            let y = area.y + 3 + i as u16;
            if y >= area.y + area.height.saturating_sub(2) {
                break;
            }
            let since = (chrono::Local::now() - entry.date)
                .to_std()
                .unwrap_or_default();
            let ago = HumanTime::from(since).to_text_en(Accuracy::Rough, Tense::Past);
            let row = format!(
                "{:>2}. {:<20} {:>5}  {}",
                i + 1,
                entry.name,
                entry.score,
                ago
            );
            let style = if i == 0 {
                bold_style.fg(Color::Yellow)
            } else {
                Style::default()
            };
            set_centered(buf, area, y, &row, style);
        }
    }

    set_centered(
        buf,
        area,
        area.y + area.height.saturating_sub(2),
        "(n) new game   (esc) quit",
        dim_style.add_modifier(Modifier::ITALIC),
    );
}

fn set_centered(buf: &mut Buffer, area: Rect, y: u16, text: &str, style: Style) {
    if y >= area.y + area.height {
        return;
    }
    let w = text.width() as u16;
    let x = area.x + area.width.saturating_sub(w) / 2;
    Paragraph::new(Span::styled(text, style))
        .alignment(Alignment::Left)
        .render(Rect::new(x, y, w.min(area.width), 1), buf);
}

fn set_cell(buf: &mut Buffer, area: Rect, x: f64, y: f64, symbol: &str, style: Style) {
    if x < area.x as f64 || y < area.y as f64 {
        return;
    }
    let (x, y) = (x as u16, y as u16);
    if x >= area.x + area.width || y >= area.y + area.height {
        return;
    }
    buf.set_stringn(x, y, symbol, (area.x + area.width - x) as usize, style);
}
