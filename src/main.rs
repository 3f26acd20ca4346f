use book_catalog_rust::catalog::Catalog;
use book_catalog_rust::{configs, create_catalog, render, Argument};
use std::collections::HashSet;
use std::io::{BufRead, Write};
use tracing::error;

fn main() {
    configs::load_dotenv();
    let config = configs::load_config()
        .unwrap_or_else(|_| panic!("Cannot loading config"));
    _ = configs::set_global_logging_config();

    let arguments = std::env::args().collect::<Vec<String>>();
    let argument = Argument::new(&arguments)
        .unwrap_or_else(|e| panic!("{}", e));

    let mut catalog = create_catalog(&config);

    println!("Loading...");
    let loaded = match argument.page {
        Some(page) => catalog.load_page_number(page),
        None => catalog.load_first(),
    };
    if let Err(e) = loaded {
        error!("{}", e);
    }
    print_page(&catalog);

    run_prompt(&mut catalog);
}

fn run_prompt(catalog: &mut Catalog) {
    let stdin = std::io::stdin();

    loop {
        print!("> ");
        _ = std::io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                error!("{}", e);
                break;
            }
        }

        let line = line.trim();
        let (command, rest) = match line.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "next" => {
                println!("Loading...");
                match catalog.load_next() {
                    Ok(true) => print_page(catalog),
                    Ok(false) => println!("No next page."),
                    Err(e) => error!("{}", e),
                }
            }
            "prev" => {
                println!("Loading...");
                match catalog.load_previous() {
                    Ok(true) => print_page(catalog),
                    Ok(false) => println!("No previous page."),
                    Err(e) => error!("{}", e),
                }
            }
            "reload" => {
                println!("Loading...");
                if let Err(e) = catalog.load_page_number(catalog.page_no()) {
                    error!("{}", e);
                }
                print_page(catalog);
            }
            "search" => {
                let found = catalog.search_title(rest);
                println!("{}", render::render_books(&found, &wishlist_ids(catalog)));
            }
            "genre" => {
                let found = catalog.filter_genre(rest);
                println!("{}", render::render_books(&found, &wishlist_ids(catalog)));
            }
            "genres" => {
                println!("{}", render::render_genres(catalog.genres()));
            }
            "wish" => match rest.parse::<u64>() {
                Ok(book_id) => match catalog.toggle_wishlist(book_id) {
                    Ok(result) => println!("{:?}: id={}", result, book_id),
                    Err(e) => error!("{}", e),
                },
                Err(_) => println!("Usage: wish <book id>"),
            },
            "wishlist" => {
                println!("{}", render::render_wishlist(&catalog.wishlist()));
            }
            "help" => print_help(),
            "quit" | "exit" => break,
            _ => {
                println!("Unknown command: {}", command);
                print_help();
            }
        }
    }
}

fn wishlist_ids(catalog: &Catalog) -> HashSet<u64> {
    catalog.wishlist().iter()
        .map(|entry| entry.book_id())
        .collect()
}

fn print_page(catalog: &Catalog) {
    println!("{}", render::render_status(catalog.page_no(), catalog.has_previous(), catalog.has_next()));
    println!("{}", render::render_books(catalog.books(), &wishlist_ids(catalog)));
}

fn print_help() {
    println!("Commands:");
    println!("  next            다음 페이지를 로드");
    println!("  prev            이전 페이지를 로드");
    println!("  reload          현재 페이지를 다시 로드");
    println!("  search <query>  현재 페이지에서 제목으로 검색");
    println!("  genre <genre>   현재 페이지에서 장르로 필터링");
    println!("  genres          현재 페이지의 장르 목록 출력");
    println!("  wish <book id>  위시리스트에 추가/제거 토글");
    println!("  wishlist        저장 된 위시리스트 출력");
    println!("  quit            종료");
}
