//! Flat-color rendering: terrain culled around the player, enemy markers,
//! the player sprite, a HUD line, and the modal overlay panels.

use game_core::combat::Phase;
use game_core::library::XP_PER_LEVEL;
use game_core::quiz::QuizSession;
use game_core::{Facing, Overlay, TILE_SIZE, TileKind, World};
use macroquad::prelude::*;

use crate::app_loop::{AppState, BookDraft, DraftField, ShelfMode};

const PANEL_MARGIN: f32 = 60.0;
const LOG_TAIL_LINES: usize = 8;

pub fn draw(app: &AppState) {
    clear_background(Color::new(0.05, 0.05, 0.08, 1.0));

    let state = app.sim.state();
    let camera_x = state.player.pos.x + TILE_SIZE / 2.0 - screen_width() / 2.0;
    let camera_y = state.player.pos.y + TILE_SIZE / 2.0 - screen_height() / 2.0;

    draw_terrain(&state.world, camera_x, camera_y);

    for (_, enemy) in &state.enemies {
        let x = enemy.pos.x - camera_x;
        let y = enemy.pos.y - camera_y;
        if x > -TILE_SIZE && x < screen_width() && y > -TILE_SIZE && y < screen_height() {
            draw_circle(x + TILE_SIZE / 2.0, y + TILE_SIZE / 2.0, 14.0, MAROON);
            draw_circle(x + TILE_SIZE / 2.0, y + TILE_SIZE / 2.0, 10.0, RED);
        }
    }

    draw_player(app, camera_x, camera_y);
    draw_hud(app);

    match state.overlay {
        Overlay::None => {}
        Overlay::Bookshelf => draw_shelf(app),
        Overlay::Spellbook => draw_spellbook(app),
        Overlay::Combat => draw_combat(app),
    }
}

fn tile_color(tile: TileKind) -> Color {
    match tile {
        TileKind::Floor => Color::new(0.55, 0.45, 0.32, 1.0),
        TileKind::Wall | TileKind::WallEdge(_) => DARKGRAY,
        TileKind::Grass1 => Color::new(0.30, 0.62, 0.25, 1.0),
        TileKind::Grass2 => Color::new(0.25, 0.55, 0.22, 1.0),
        TileKind::Grass3 => Color::new(0.33, 0.58, 0.28, 1.0),
        TileKind::Tree => Color::new(0.10, 0.35, 0.12, 1.0),
        TileKind::Mountain => GRAY,
        TileKind::Bookshelf => Color::new(0.40, 0.22, 0.10, 1.0),
        TileKind::RugCenter
        | TileKind::RugTopLeft
        | TileKind::RugTop
        | TileKind::RugTopRight
        | TileKind::RugLeft
        | TileKind::RugRight
        | TileKind::RugBottomLeft
        | TileKind::RugBottom
        | TileKind::RugBottomRight => Color::new(0.55, 0.15, 0.20, 1.0),
    }
}

fn draw_terrain(world: &World, camera_x: f32, camera_y: f32) {
    let first_col = (camera_x / TILE_SIZE).floor() as i32 - 1;
    let first_row = (camera_y / TILE_SIZE).floor() as i32 - 1;
    let cols = (screen_width() / TILE_SIZE).ceil() as i32 + 2;
    let rows = (screen_height() / TILE_SIZE).ceil() as i32 + 2;

    for row in first_row..first_row + rows {
        for col in first_col..first_col + cols {
            // Ungenerated terrain stays the void color.
            let Some(tile) = world.tile_at_global(col, row) else {
                continue;
            };
            draw_rectangle(
                col as f32 * TILE_SIZE - camera_x,
                row as f32 * TILE_SIZE - camera_y,
                TILE_SIZE,
                TILE_SIZE,
                tile_color(tile),
            );
        }
    }
}

fn draw_player(app: &AppState, camera_x: f32, camera_y: f32) {
    let player = &app.sim.state().player;
    let x = player.pos.x - camera_x;
    let y = player.pos.y - camera_y;

    // A two-phase walk bob in place of sprite sheet frames.
    let bob = if player.walking && player.frame % 2 == 1 { 2.0 } else { 0.0 };
    draw_rectangle(x + 13.0, y + 8.0 + bob, 24.0, 34.0, Color::new(0.25, 0.30, 0.65, 1.0));
    draw_rectangle(x + 17.0, y + bob, 16.0, 14.0, BEIGE);

    let (dot_x, dot_y) = match player.facing {
        Facing::Down => (x + 25.0, y + 44.0),
        Facing::Up => (x + 25.0, y + 2.0),
        Facing::Left => (x + 9.0, y + 24.0),
        Facing::Right => (x + 41.0, y + 24.0),
    };
    draw_circle(dot_x, dot_y, 3.0, GOLD);
}

fn draw_hud(app: &AppState) {
    let line = match &app.wizard {
        Some(wizard) => format!(
            "{}  Lv {}  XP {}/{}  |  E interact  Tab spellbook  Esc close",
            wizard.name, wizard.level, wizard.experience, XP_PER_LEVEL
        ),
        None => "E interact  Tab spellbook  Esc close".to_string(),
    };
    draw_text(&line, 12.0, 22.0, 20.0, WHITE);

    if let Some(status) = &app.status {
        draw_text(status, 12.0, screen_height() - 14.0, 20.0, GOLD);
    }
}

fn panel(title: &str) {
    let width = screen_width() - PANEL_MARGIN * 2.0;
    let height = screen_height() - PANEL_MARGIN * 2.0;
    draw_rectangle(PANEL_MARGIN, PANEL_MARGIN, width, height, Color::new(0.08, 0.06, 0.05, 0.96));
    draw_rectangle_lines(PANEL_MARGIN, PANEL_MARGIN, width, height, 3.0, GOLD);
    draw_text(title, PANEL_MARGIN + 18.0, PANEL_MARGIN + 34.0, 30.0, WHITE);
}

fn draw_shelf(app: &AppState) {
    match &app.shelf_mode {
        ShelfMode::Browsing => draw_shelf_browser(app),
        ShelfMode::Writing(draft) => draw_draft(draft),
        ShelfMode::Quiz(session) => draw_quiz(session),
    }
}

fn draw_shelf_browser(app: &AppState) {
    panel("The Bookshelf");
    let left = PANEL_MARGIN + 18.0;
    draw_text(
        "N write  Q quiz  X burn  Up/Down select  Esc close",
        left,
        PANEL_MARGIN + 60.0,
        18.0,
        LIGHTGRAY,
    );

    if app.books.is_empty() {
        draw_text("The shelf is bare.", left, PANEL_MARGIN + 100.0, 22.0, LIGHTGRAY);
        return;
    }

    for (index, book) in app.books.iter().enumerate() {
        let y = PANEL_MARGIN + 100.0 + index as f32 * 26.0;
        let selected = index == app.shelf_selection;
        let color = if selected { GOLD } else { WHITE };
        let marker = if selected { ">" } else { " " };
        let line = format!(
            "{marker} {} - {} ({} ch.)",
            book.title, book.author, book.chapters
        );
        draw_text(&line, left, y, 22.0, color);
    }
}

fn draw_draft(draft: &BookDraft) {
    panel("A Blank Volume");
    let left = PANEL_MARGIN + 18.0;
    let field_line = |label: &str, value: &str, field: DraftField, y: f32| {
        let active = draft.field == field;
        let color = if active { GOLD } else { WHITE };
        let cursor = if active { "_" } else { "" };
        draw_text(&format!("{label}: {value}{cursor}"), left, y, 24.0, color);
    };
    field_line("Title", &draft.title, DraftField::Title, PANEL_MARGIN + 90.0);
    field_line("Author", &draft.author, DraftField::Author, PANEL_MARGIN + 130.0);
    field_line("Chapters", &draft.chapters, DraftField::Chapters, PANEL_MARGIN + 170.0);
    draw_text(
        "Enter next field / sign & save   Esc discard",
        left,
        PANEL_MARGIN + 220.0,
        18.0,
        LIGHTGRAY,
    );
}

fn draw_quiz(session: &QuizSession) {
    if session.finished() {
        panel("The End");
        draw_text(
            &format!("Score: {} / {}", session.score(), session.len()),
            PANEL_MARGIN + 18.0,
            PANEL_MARGIN + 100.0,
            32.0,
            GOLD,
        );
        draw_text(
            "Enter close the book",
            PANEL_MARGIN + 18.0,
            PANEL_MARGIN + 140.0,
            18.0,
            LIGHTGRAY,
        );
        return;
    }

    panel(&format!("Trial of Knowledge - Ch. {}", session.index() + 1));
    let left = PANEL_MARGIN + 18.0;
    let Some(question) = session.current() else {
        return;
    };

    draw_text(&question.question, left, PANEL_MARGIN + 80.0, 22.0, WHITE);

    for (index, option) in question.options.iter().enumerate() {
        let y = PANEL_MARGIN + 130.0 + index as f32 * 30.0;
        let letter = char::from(b'A' + index as u8);
        let color = match session.answered() {
            Some(_) if *option == question.correct_answer => GREEN,
            Some(picked) if picked == index => RED,
            Some(_) => DARKGRAY,
            None => WHITE,
        };
        draw_text(&format!("{}. {option}  [{letter}]", index + 1), left, y, 22.0, color);
    }

    if session.answered().is_some() {
        draw_text(&question.explanation, left, PANEL_MARGIN + 270.0, 18.0, LIGHTGRAY);
        draw_text("Enter next page", left, PANEL_MARGIN + 300.0, 18.0, LIGHTGRAY);
    } else {
        draw_text("Pick 1-4", left, PANEL_MARGIN + 270.0, 18.0, LIGHTGRAY);
    }
}

fn draw_spellbook(app: &AppState) {
    panel("Wizard's Spellbook");
    let left = PANEL_MARGIN + 18.0;
    draw_text(
        "N inscribe  U sharpen  X destroy  Up/Down select  Esc close",
        left,
        PANEL_MARGIN + 60.0,
        18.0,
        LIGHTGRAY,
    );

    if app.spells.is_empty() {
        draw_text("No spells inscribed yet.", left, PANEL_MARGIN + 100.0, 22.0, LIGHTGRAY);
        return;
    }

    for (index, spell) in app.spells.iter().enumerate() {
        let y = PANEL_MARGIN + 100.0 + index as f32 * 26.0;
        let selected = index == app.spell_selection;
        let color = if selected { GOLD } else { WHITE };
        let marker = if selected { ">" } else { " " };
        let effect = if spell.effect { " +effect" } else { "" };
        let line = format!(
            "{marker} {}  [{}]  dmg {}{}",
            spell.name, spell.school, spell.dmg, effect
        );
        draw_text(&line, left, y, 22.0, color);
    }
}

fn draw_combat(app: &AppState) {
    panel("Combat");
    let Some(encounter) = app.sim.encounter() else {
        return;
    };
    let left = PANEL_MARGIN + 18.0;
    let opponent = encounter.opponent();

    draw_text(
        &format!("You  {} / {}", encounter.player_hp(), game_core::combat::PLAYER_MAX_HP),
        left,
        PANEL_MARGIN + 70.0,
        24.0,
        SKYBLUE,
    );
    hp_bar(left, PANEL_MARGIN + 80.0, encounter.player_hp(), game_core::combat::PLAYER_MAX_HP, SKYBLUE);

    draw_text(
        &format!("{}  {} / {}  (Lv {})", opponent.name, opponent.hp, opponent.max_hp, opponent.level),
        left,
        PANEL_MARGIN + 140.0,
        24.0,
        RED,
    );
    hp_bar(left, PANEL_MARGIN + 150.0, opponent.hp, opponent.max_hp, RED);

    let prompt = match encounter.phase() {
        Phase::Fighting if encounter.enemy_turn_pending() => "The enemy is winding up...",
        Phase::Fighting => "Space cast fireball",
        Phase::Victory { .. } => "Victory!",
        Phase::Defeat => "You were defeated... Esc to limp away",
    };
    draw_text(prompt, left, PANEL_MARGIN + 200.0, 22.0, GOLD);

    let log = encounter.log();
    let start = log.len().saturating_sub(LOG_TAIL_LINES);
    for (offset, line) in log[start..].iter().enumerate() {
        let y = PANEL_MARGIN + 240.0 + offset as f32 * 22.0;
        draw_text(line, left, y, 20.0, LIGHTGRAY);
    }
}

fn hp_bar(x: f32, y: f32, hp: i32, max_hp: i32, color: Color) {
    let width = 260.0;
    let ratio = if max_hp > 0 { (hp.max(0) as f32 / max_hp as f32).min(1.0) } else { 0.0 };
    draw_rectangle(x, y + 6.0, width, 10.0, DARKGRAY);
    draw_rectangle(x, y + 6.0, width * ratio, 10.0, color);
}
