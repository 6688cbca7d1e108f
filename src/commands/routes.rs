use crate::{
    RoutesArgs,
    build::{Builder, base_path_from_config},
    config::Config,
};

/// Print the route table without writing any output.
pub async fn run(args: &RoutesArgs) -> Result<(), anyhow::Error> {
    let config_path = super::config_path(args.config_file.as_deref())?;
    let config = Config::load_from_arg(Some(config_path.as_path())).await?;
    let builder = Builder::new(config, base_path_from_config(&config_path));

    let plan = builder.plan()?;

    for page in plan.pages.pages() {
        if args.json {
            println!("{}", serde_json::to_string(page)?);
            continue;
        }

        let ctx = &page.context;
        println!(
            "{:<7} {:<12} {}  (prev: {}, next: {})",
            ctx.category,
            page.template,
            page.path,
            ctx.previous_id.as_ref().map_or("-", |id| id.as_str()),
            ctx.next_id.as_ref().map_or("-", |id| id.as_str()),
        );
    }

    for redirect in plan.pages.redirects() {
        if args.json {
            println!("{}", serde_json::to_string(redirect)?);
        } else {
            println!(
                "{:<7} {:<12} {} -> {}{}",
                "redirect",
                redirect.status(),
                redirect.from_path,
                redirect.to_path,
                if redirect.force { " (forced)" } else { "" }
            );
        }
    }

    if !args.json {
        let counts: Vec<String> = plan
            .report
            .pages
            .iter()
            .map(|(category, count)| format!("{count} {category}"))
            .collect();
        println!("\n{} page(s): {}", plan.report.total_pages(), counts.join(", "));
    }

    Ok(())
}
