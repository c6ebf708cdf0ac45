use std::fs;
use std::path::Path;

use card_core::format::write_block;
use card_core::{Card, Difficulty, OperationKind, PageProfile};
use card_press::{RunConfig, Stages, Styles};
use card_render::raster::save_png;
use lopdf::{Document, Object};
use tiny_skia::{Color, Pixmap};

fn solid(width: u32, height: u32, color: Color) -> Pixmap {
    let mut p = Pixmap::new(width, height).unwrap();
    p.fill(color);
    p
}

fn seed_inputs(base: &Path) {
    let templates = base.join("input/templates");
    let pack = base.join("input/Assets/Animals");
    fs::create_dir_all(&templates).unwrap();
    fs::create_dir_all(&pack).unwrap();

    for d in ["Easy", "Medium", "Hard", "Standard"] {
        let card =
            |name: String, color| save_png(&solid(400, 560, color), &templates.join(name)).unwrap();
        card(format!("FC Front {d}.png"), Color::from_rgba8(30, 60, 160, 255));
        card(format!("FC Back {d}.png"), Color::WHITE);
        for op in ["Plus", "Minus"] {
            let symbol = templates.join(format!("{op} {d}.png"));
            save_png(&solid(12, 12, Color::BLACK), &symbol).unwrap();
        }
    }
    for page in ["A4_Page_Small.png", "A4_Page_Small_Back.png"] {
        save_png(&solid(500, 700, Color::WHITE), &templates.join(page)).unwrap();
    }
    save_png(&solid(16, 16, Color::from_rgba8(0, 180, 0, 255)), &pack.join("Fish.png")).unwrap();
}

fn card(index: u32, a: u32, b: u32, difficulty: Difficulty) -> Card {
    let words = ["zero", "one", "two", "three", "four", "five", "six"];
    Card {
        index,
        difficulty,
        front_text: "How many Fish are there now?".into(),
        rear_text: format!(
            "{} Fish plus {} Fish equals {} Fish.",
            words[a as usize], words[b as usize], words[(a + b) as usize]
        ),
        operation: format!("{a} + {b} = {}", a + b),
        image: "Fish".into(),
    }
}

#[test]
fn three_card_addition_deck_makes_a_two_page_small_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path();
    seed_inputs(base);

    let config = RunConfig {
        base_dir: base.to_path_buf(),
        asset_pack: "Animals".into(),
        operation: OperationKind::Addition,
        stages: Stages { operations: false, cards: true, pdf: true },
        styles: Styles { standard: true, color_graded: false },
        sizes: vec![PageProfile::Small],
        ..RunConfig::default()
    };
    let paths = config.paths();
    fs::create_dir_all(paths.gen_dir()).unwrap();
    let text: String = [
        card(1, 2, 4, Difficulty::Medium),
        card(2, 1, 1, Difficulty::Easy),
        card(3, 3, 3, Difficulty::Hard),
    ]
    .iter()
    .map(write_block)
    .collect();
    fs::write(paths.card_file(), text).unwrap();

    let outputs = card_press::run(&config).unwrap();
    assert_eq!(outputs.len(), 1);
    let pdf_path = &outputs[0];
    assert!(pdf_path.ends_with("Gen/Animals/Final_PDFs/Addition/Standard/A4_Small.pdf"));

    let cards_dir = paths.cards_dir(card_core::Style::Standard);
    for n in 1..=3 {
        assert!(cards_dir.join(format!("Card_{n}.png")).is_file());
        assert!(cards_dir.join(format!("Card_{n}_Back.png")).is_file());
    }

    let doc = Document::load(pdf_path).unwrap();
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 2);
    let rotate = |n: u32| {
        let page = doc.get_object(pages[&n]).unwrap().as_dict().unwrap();
        page.get(b"Rotate").and_then(Object::as_i64).unwrap_or(0)
    };
    assert_eq!(rotate(1), 0);
    assert_eq!(rotate(2), 180);

    let leftovers: Vec<_> = fs::read_dir(pdf_path.parent().unwrap())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().starts_with("temp_"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn missing_card_images_do_not_produce_a_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path();
    seed_inputs(base);

    let config = RunConfig {
        base_dir: base.to_path_buf(),
        stages: Stages { operations: false, cards: false, pdf: true },
        styles: Styles { standard: true, color_graded: false },
        sizes: vec![PageProfile::Small],
        ..RunConfig::default()
    };
    // An empty card file forces nothing to render, so the PDF stage finds no images.
    let paths = config.paths();
    fs::create_dir_all(paths.gen_dir()).unwrap();
    fs::write(paths.card_file(), "").unwrap();

    let outputs = card_press::run(&config).unwrap();
    assert!(outputs.is_empty());
}
