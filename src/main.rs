use clap::{ArgGroup, Parser, Subcommand};
use gigil::Services;
use gigil_core::config::Config;
use gigil_core::gifting::GiftQuery;
use gigil_core::BlogPostQuery;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gigil", about = "Gigil content layer — query the CMS and gifting API")]
struct Cli {
    /// Write debug logs to /tmp/gigil-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Config file to use instead of ~/.config/gigil/config.toml.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the blog collection name and print it.
    Endpoint,
    /// List normalised blog posts.
    Posts {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        page_size: Option<u32>,
        /// Sort key such as `title:asc`; repeatable.
        #[arg(long)]
        sort: Vec<String>,
        /// Only posts in the category with this slug.
        #[arg(long)]
        category: Option<String>,
    },
    /// Fetch one normalised blog post.
    #[command(group(ArgGroup::new("key").required(true).args(["id", "slug"])))]
    Post {
        #[arg(long)]
        id: Option<i64>,
        #[arg(long)]
        slug: Option<String>,
    },
    /// List blog categories.
    Categories,
    /// List gifts.
    Gifts {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        sort: Option<String>,
    },
    /// List gift lists.
    GiftLists,
    /// Check the gifting API health endpoint.
    Health,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/gigil-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("gigil debug log started — tail -f /tmp/gigil-debug.log");
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default config");
            Config::defaults()
        }),
    };

    run(cli.command, &Services::from_config(&config)).await
}

async fn run(command: Command, services: &Services) -> anyhow::Result<()> {
    match command {
        Command::Endpoint => print_json(&services.resolver().resolve().await),
        Command::Posts {
            page,
            page_size,
            sort,
            category,
        } => {
            let mut query = BlogPostQuery::new();
            for key in sort {
                query = query.sort(key);
            }
            if page.is_some() || page_size.is_some() {
                query = query.page(page.unwrap_or(1), page_size.unwrap_or(10));
            }
            if let Some(slug) = category {
                query = query.filter("category.slug.$eq", slug);
            }
            print_json(&services.blog.fetch_posts_page(&query).await?)
        }
        Command::Post { id: Some(id), .. } => {
            print_json(&services.blog.fetch_post_by_id(id).await?)
        }
        Command::Post { slug, .. } => {
            let slug = slug.unwrap_or_default();
            print_json(&services.blog.fetch_post_by_slug(&slug).await?)
        }
        Command::Categories => print_json(&services.blog.fetch_categories().await?),
        Command::Gifts {
            page,
            limit,
            category,
            search,
            sort,
        } => {
            let query = GiftQuery {
                page,
                limit,
                category,
                search,
                sort,
            };
            print_json(&services.gifting.fetch_gifts(&query).await?)
        }
        Command::GiftLists => print_json(&services.gifting.fetch_gift_lists().await?),
        Command::Health => {
            let healthy = services.gifting.check_health().await;
            print_json(&serde_json::json!({ "healthy": healthy }))?;
            if !healthy {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
