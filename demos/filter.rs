const BLACK_MAX_LIGHTNESS: f32 = 0.05;
const WHITE_MIN_LIGHTNESS: f32 = 0.95;

// this filter keeps the default transparency check and also ignores near-black and near-white
// pixels, e.g. shadows and studio backdrop left behind by the background removal
struct NoExtremesFilter;
impl dominance::Filter for NoExtremesFilter {
    fn is_allowed(&self, _: (u8, u8, u8, u8), (_, _, l): (f32, f32, f32)) -> bool {
        !is_black(l) && !is_white(l)
    }
}

fn is_black(l: f32) -> bool {
    l <= BLACK_MAX_LIGHTNESS
}

fn is_white(l: f32) -> bool {
    l >= WHITE_MIN_LIGHTNESS
}

fn main() {
    let path = std::env::args().nth(1).unwrap_or_else(|| "shirt.png".to_string());
    let image = dominance::load_image(path).unwrap();

    let colors = dominance::DominantColors::from_image(image)
        .add_filter(NoExtremesFilter) // added after the default opaque filter
        .generate();

    println!("{:#?}", colors);
}
