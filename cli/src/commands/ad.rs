use rehome_core::{NewAd, Pager, CATEGORIES};
use validator::Validate;

use crate::{
    app_config::AppConfig,
    args::{AdCommand, AdCreateArgs},
    browse::{self, AdSource},
    forms::{canonical_category, validate_image, validation_message, NewAdForm},
    session::Session,
    web_client::Client,
};

/// Page size used when scanning the user's own ads for a specific id
const SCAN_PAGE_SIZE: usize = 40;

pub fn ad_cmd(
    client: &dyn Client,
    session: Option<&Session>,
    config: &AppConfig,
    command: AdCommand,
) -> anyhow::Result<()> {
    let Some(session) = session else {
        anyhow::bail!("Must be a registered user to create an ad");
    };

    match command {
        AdCommand::Create(args) => create_cmd(client, session, args),
        AdCommand::Mine(args) => {
            let mut pager = Pager::new(
                args.per_page,
                AdSource::Mine {
                    user_id: session.user.id,
                },
            );
            pager.set_page(args.page);

            if args.interactive {
                browse::interactive(
                    &mut pager,
                    client,
                    Some(session),
                    config.image_origin(),
                    args.output,
                )
            } else {
                browse::render_once(&mut pager, client, args.output)
            }
        }
        AdCommand::Delete { ad_id } => delete_cmd(client, session, ad_id),
    }
}

/// Validate locally, then submit the ad (and its optional image) as one
/// multipart request.
fn create_cmd(client: &dyn Client, session: &Session, args: AdCreateArgs) -> anyhow::Result<()> {
    let category = canonical_category(&args.category).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown category: {} (expected one of {})",
            args.category,
            CATEGORIES.join(", ")
        )
    })?;

    let form = NewAdForm {
        category: category.to_string(),
        pet_name: args.name,
        pet_age: args.age,
        pet_gender: args.gender.as_str().to_string(),
        ad_content: args.content,
    };

    if let Err(errors) = form.validate() {
        anyhow::bail!("{}", validation_message(&errors));
    }

    if let Some(image) = &args.image {
        validate_image(image)?;
    }

    let new_ad: NewAd = form.into();
    let message = client
        .create_ad(&session.user, &new_ad, args.image.as_deref())
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    println!("{message}");

    Ok(())
}

/// Delete one of the user's own ads. The service also needs the ad's stored
/// image path, so the ad is first located among the user's ads.
fn delete_cmd(client: &dyn Client, session: &Session, ad_id: i64) -> anyhow::Result<()> {
    let image_path = find_own_ad_image(client, session.user.id, ad_id)?
        .ok_or_else(|| anyhow::anyhow!("Ad {ad_id} is not one of your ads"))?;

    let message = client
        .delete_ad(ad_id, &image_path)
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    println!("{message}");

    Ok(())
}

fn find_own_ad_image(
    client: &dyn Client,
    user_id: i64,
    ad_id: i64,
) -> anyhow::Result<Option<String>> {
    let mut page = 1;
    loop {
        let batch = client
            .list_user_ads(user_id, page, SCAN_PAGE_SIZE)
            .map_err(|e| anyhow::anyhow!("{e}"))?;

        if let Some(ad) = batch.ads.iter().find(|ad| ad.ad_id == ad_id) {
            return Ok(Some(ad.image_path.clone()));
        }

        let seen = (page * SCAN_PAGE_SIZE) as u64;
        if batch.ads.is_empty() || seen >= batch.total_ads {
            return Ok(None);
        }
        page += 1;
    }
}
