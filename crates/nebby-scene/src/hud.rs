//! HUD overlay: epoch, sector and progress through the epoch.

use nebby_core::HudReadout;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Clear, Gauge, Paragraph},
};

const HUD_TITLE: &str = "Nebby Orbit";
const HUD_SUBTITLE: &str = "Stage 0 • Visual simulation";
const HUD_WIDTH: u16 = 32;
const HUD_HEIGHT: u16 = 8;

const LABEL: Color = Color::Rgb(160, 150, 200);
const VALUE: Color = Color::Rgb(245, 235, 255);
const ACCENT: Color = Color::Rgb(180, 120, 255);

/// Panel position in the top-left corner, shrunk to fit small terminals.
pub fn hud_area(area: Rect) -> Rect {
    let x = area.x + 2.min(area.width);
    let y = area.y + 1.min(area.height);
    Rect {
        x,
        y,
        width: HUD_WIDTH.min(area.right().saturating_sub(x)),
        height: HUD_HEIGHT.min(area.bottom().saturating_sub(y)),
    }
}

/// Draw the HUD panel over whatever is already in the frame.
pub fn render_hud(frame: &mut Frame, readout: &HudReadout) {
    let area = hud_area(frame.area());
    if area.width < 4 || area.height < 3 {
        return;
    }

    let block = Block::bordered()
        .title(Line::from(HUD_TITLE).bold().fg(VALUE))
        .border_style(Style::new().fg(ACCENT))
        .style(Style::new().bg(Color::Rgb(8, 6, 20)));
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let [epoch, sector, _, bar, sub] = Layout::vertical([Constraint::Length(1); 5]).areas(inner);

    frame.render_widget(row("Epoch", readout.epoch_label()), epoch);
    frame.render_widget(row("Sector", readout.sector_label()), sector);

    let gauge = Gauge::default()
        .ratio(readout.fill_ratio())
        .label(format!("{:.1}%", readout.percent))
        .gauge_style(Style::new().fg(ACCENT).bg(Color::Rgb(30, 20, 50)));
    frame.render_widget(gauge, bar);

    frame.render_widget(
        Paragraph::new(HUD_SUBTITLE).style(Style::new().fg(LABEL).italic()),
        sub,
    );
}

fn row(label: &'static str, value: String) -> Paragraph<'static> {
    Paragraph::new(Line::from(vec![
        format!("{label:<8}").fg(LABEL),
        value.bold().fg(VALUE),
    ]))
}
