use super::file_properties::FileProperties;

#[derive(Debug, Default)]
pub struct MultipartForm {
    pub fields: Vec<(String, String)>,
    pub files: Vec<FileProperties>,
}

impl MultipartForm {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field_name, _)| field_name == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn files_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FileProperties> {
        self.files.iter().filter(move |file| file.field_name == name)
    }
}
