pub const WINDOW_WIDTH: u32 = 450;
pub const WINDOW_HEIGHT: u32 = 800;

/// Text sizes in scene units
pub const LABEL_FONT_SIZE: f32 = 15.0;
pub const FEATURED_LABEL_FONT_SIZE: f32 = 48.0;
pub const FEATURED_RADIUS: f32 = 60.0;

/// Draw order, back to front
pub const Z_GRASS: f32 = 1.0;
pub const Z_BUSH: f32 = 2.0;
pub const Z_FLOWER: f32 = 2.5;
pub const Z_VENDOR: f32 = 3.0;
pub const Z_CLOUD: f32 = 4.0;
pub const Z_BALLOON: f32 = 10.0;

#[derive(Clone, Copy)]
pub struct Colors;

impl Colors {
    pub const SKY: u32 = 0x87ceeb;
    pub const GRASS: u32 = 0x228b22;
    pub const BUSH: u32 = 0x006400;
    pub const FLOWER_CENTER: u32 = 0xffff00;
    pub const FLOWER_PETALS: [u32; 3] = [0xe600ff, 0xff7b00, 0x0011ff];
    pub const CLOUD: u32 = 0xffffff;
    pub const TETHER: u32 = 0x474747;
    pub const STALL_ROOF: u32 = 0xb3a492;
    pub const STALL_LEGS: u32 = 0x654321;
    pub const STALL_BODY: u32 = 0x776b5d;
    pub const STALL_PANEL: u32 = 0xd6c7ae;
    pub const STALL_STRING: u32 = 0x808080;
    pub const FEATURED_ENVELOPE: u32 = 0xffa500;
    pub const FEATURED_STRIPE: u32 = 0x008000;
    pub const FEATURED_BASKET: u32 = 0x6b241c;
    pub const HUD_TEXT: u32 = 0x1a1a2e;
}

pub fn color_from_hex(rgb: u32) -> bevy::prelude::Color {
    let r = ((rgb >> 16) & 0xff) as f32 / 255.0;
    let g = ((rgb >> 8) & 0xff) as f32 / 255.0;
    let b = (rgb & 0xff) as f32 / 255.0;
    bevy::prelude::Color::srgb(r, g, b)
}
