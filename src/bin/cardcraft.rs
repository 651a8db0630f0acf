use std::io::{self, Write};

use card_craft::client::render::{render_field_errors, render_session};
use card_craft::client::{CardService, CardSession, HttpCardService, Rejected, CATEGORIES};
use card_craft::GenerationRequest;

fn prompt(label: &str) -> io::Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Fill the form from stdin. `None` means stdin was closed.
fn read_form(session: &mut CardSession) -> io::Result<Option<()>> {
    let Some(product_name) = prompt("Product Name (e.g., Smart Fitness Watch): ")? else {
        return Ok(None);
    };
    session.form_mut().set_product_name(product_name);

    println!("Category:");
    for (index, category) in CATEGORIES.iter().enumerate() {
        println!("  {:>2}. {}", index + 1, category);
    }
    let Some(choice) = prompt("Select a category [1-21]: ")? else {
        return Ok(None);
    };
    let selected = choice
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|number| number.checked_sub(1))
        .map(|index| session.form_mut().select_category_index(index))
        .unwrap_or(false);
    if !selected {
        session.form_mut().clear_category();
    }
    Ok(Some(()))
}

/// Show the in-flight state (skeleton or dimmed card), then settle the session.
async fn run_request(session: &mut CardSession, service: &HttpCardService, request: GenerationRequest) {
    print!("{}", render_session(session));
    let outcome = service.generate_marketing_card(&request).await;
    session.finish(outcome);
    print!("{}", render_session(session));
    session.take_notification();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let service = HttpCardService::from_env();

    println!("🃏 CardCraft AI");
    println!("==========================================");
    println!("Generate Product Details with AI");
    println!("Enter the product name and select the category to generate details.");
    println!();

    if let Err(e) = service.health().await {
        eprintln!("⚠ Card service at {} is not reachable: {}", service.base_url(), e);
    }

    let mut session = CardSession::new();
    print!("{}", render_session(&session));

    loop {
        if read_form(&mut session)?.is_none() {
            break;
        }

        match session.begin_submit() {
            Ok(request) => run_request(&mut session, &service, request).await,
            Err(Rejected::InvalidForm(errors)) => {
                print!("{}", render_field_errors(&errors));
                continue;
            }
            Err(e) => {
                eprintln!("❌ {}", e);
                continue;
            }
        }

        loop {
            let label = if session.can_regenerate() {
                "[r] Regenerate  [n] New card  [q] Quit: "
            } else {
                "[n] New card  [q] Quit: "
            };
            let Some(choice) = prompt(label)? else {
                return Ok(());
            };
            match choice.trim() {
                "r" | "R" if session.can_regenerate() => {
                    match session.begin_regenerate() {
                        Ok(request) => run_request(&mut session, &service, request).await,
                        Err(e) => eprintln!("❌ {}", e),
                    }
                }
                "n" | "N" => break,
                "q" | "Q" => return Ok(()),
                _ => {}
            }
        }
    }

    Ok(())
}
