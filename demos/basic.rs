fn main() {
    let path = std::env::args().nth(1).unwrap_or_else(|| "shirt.png".to_string());
    let image = dominance::load_image(path).unwrap();

    let colors = dominance::DominantColors::from_image(image).generate();

    for color in colors.colors() {
        println!("{color}");
    }
}
