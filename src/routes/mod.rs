pub mod health;
pub mod images;
pub mod properties;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/properties")
            .service(properties::list_properties)
            .service(properties::add_property)
            .service(properties::edit_property)
            .service(properties::delete_property),
    )
    .service(web::scope("/image").service(images::get_image));
}
