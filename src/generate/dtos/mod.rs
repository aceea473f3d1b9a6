pub mod generate_image_dto;
pub mod generate_json_dto;
