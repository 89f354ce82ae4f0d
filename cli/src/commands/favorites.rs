use rehome_core::Pager;

use crate::{
    app_config::AppConfig,
    args::FavoritesCommand,
    browse::{self, AdSource},
    session::Session,
    web_client::Client,
};

pub fn favorites_cmd(
    client: &dyn Client,
    session: Option<&Session>,
    config: &AppConfig,
    command: FavoritesCommand,
) -> anyhow::Result<()> {
    let Some(session) = session else {
        anyhow::bail!("You must be logged in to manage favorites");
    };

    match command {
        FavoritesCommand::List(args) => {
            let mut pager = Pager::new(
                args.per_page,
                AdSource::Favorites {
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
        FavoritesCommand::Add { ad_id } => {
            let message = client
                .add_favorite(session.user.id, ad_id)
                .map_err(|e| anyhow::anyhow!("{e}"))?;
            println!("{message}");
            Ok(())
        }
        FavoritesCommand::Remove { ad_id } => {
            let message = client
                .remove_favorite(session.user.id, ad_id)
                .map_err(|e| anyhow::anyhow!("{e}"))?;
            println!("{message}");
            Ok(())
        }
    }
}
