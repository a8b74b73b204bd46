//! Route configuration
//!
//! Centralized route setup; each domain manages its own routes. Every
//! scope except the healthcheck sits behind the JWT middleware.

use crate::handlers;
use crate::middleware::JwtAuthMiddleware;
use actix_web::web;

/// Configure all routes for the application
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/healthcheck", web::get().to(handlers::healthcheck))
            .configure(routes::comments::configure)
            .configure(routes::likes::configure)
            .configure(routes::playlists::configure)
            .configure(routes::subscriptions::configure)
            .configure(routes::tweets::configure)
            .configure(routes::dashboard::configure),
    );
}

// Sub-modules for each domain
mod routes {
    use super::*;

    pub mod comments {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/videos")
                    .wrap(JwtAuthMiddleware)
                    .route(
                        "/{video_id}/comments",
                        web::get().to(handlers::get_video_comments),
                    )
                    .route("/{video_id}/comments", web::post().to(handlers::add_comment)),
            )
            .service(
                web::scope("/comments")
                    .wrap(JwtAuthMiddleware)
                    .route("/{comment_id}", web::patch().to(handlers::update_comment))
                    .route("/{comment_id}", web::delete().to(handlers::delete_comment)),
            );
        }
    }

    pub mod likes {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/likes")
                    .wrap(JwtAuthMiddleware)
                    .route(
                        "/toggle/v/{video_id}",
                        web::post().to(handlers::toggle_video_like),
                    )
                    .route(
                        "/toggle/c/{comment_id}",
                        web::post().to(handlers::toggle_comment_like),
                    )
                    .route(
                        "/toggle/t/{tweet_id}",
                        web::post().to(handlers::toggle_tweet_like),
                    )
                    .route("/videos", web::get().to(handlers::get_liked_videos)),
            );
        }
    }

    pub mod playlists {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/playlists")
                    .wrap(JwtAuthMiddleware)
                    .route("", web::post().to(handlers::create_playlist))
                    .route("/user/{user_id}", web::get().to(handlers::get_user_playlists))
                    .route(
                        "/{playlist_id}",
                        web::get().to(handlers::get_playlist_by_id),
                    )
                    .route("/{playlist_id}", web::patch().to(handlers::update_playlist))
                    .route(
                        "/{playlist_id}",
                        web::delete().to(handlers::delete_playlist),
                    )
                    .route(
                        "/{playlist_id}/videos/{video_id}",
                        web::patch().to(handlers::add_video_to_playlist),
                    )
                    .route(
                        "/{playlist_id}/videos/{video_id}",
                        web::delete().to(handlers::remove_video_from_playlist),
                    ),
            );
        }
    }

    pub mod subscriptions {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/subscriptions")
                    .wrap(JwtAuthMiddleware)
                    .route(
                        "/c/{channel_id}",
                        web::post().to(handlers::toggle_subscription),
                    )
                    .route(
                        "/c/{channel_id}",
                        web::get().to(handlers::get_channel_subscribers),
                    )
                    .route(
                        "/u/{subscriber_id}",
                        web::get().to(handlers::get_subscribed_channels),
                    ),
            );
        }
    }

    pub mod tweets {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/tweets")
                    .wrap(JwtAuthMiddleware)
                    .route("", web::post().to(handlers::create_tweet))
                    .route("/user/{user_id}", web::get().to(handlers::get_user_tweets))
                    .route("/{tweet_id}", web::patch().to(handlers::update_tweet))
                    .route("/{tweet_id}", web::delete().to(handlers::delete_tweet)),
            );
        }
    }

    pub mod dashboard {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/dashboard")
                    .wrap(JwtAuthMiddleware)
                    .route("/stats", web::get().to(handlers::get_channel_stats))
                    .route("/videos", web::get().to(handlers::get_channel_videos)),
            );
        }
    }
}
