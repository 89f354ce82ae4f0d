use rehome_core::{Pager, CATEGORIES};

use crate::{
    app_config::AppConfig,
    args::SeekArgs,
    browse::{self, AdSource},
    forms::canonical_category,
    session::Session,
    web_client::Client,
};

/// Browse all ads seeking a home, optionally narrowed to a category
pub fn seek_cmd(
    client: &dyn Client,
    session: Option<&Session>,
    config: &AppConfig,
    args: SeekArgs,
) -> anyhow::Result<()> {
    let category = match &args.category {
        Some(input) => match canonical_category(input) {
            Some(category) => Some(category.to_string()),
            None => anyhow::bail!(
                "Unknown category: {input} (expected one of {})",
                CATEGORIES.join(", ")
            ),
        },
        None => None,
    };

    let mut pager = Pager::new(args.listing.per_page, AdSource::All { category });
    pager.set_page(args.listing.page);

    if args.listing.interactive {
        browse::interactive(
            &mut pager,
            client,
            session,
            config.image_origin(),
            args.listing.output,
        )
    } else {
        browse::render_once(&mut pager, client, args.listing.output)
    }
}
