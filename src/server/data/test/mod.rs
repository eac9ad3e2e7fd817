mod customer;
mod document;
mod favorite;
mod make;
mod user;
mod vehicle;
mod vehicle_image;
mod vehicle_model;
