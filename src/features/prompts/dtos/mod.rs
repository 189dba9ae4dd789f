pub mod prompt_dto;

pub use prompt_dto::{
    CreatePromptDto, PromptEditView, PromptListDto, PromptPayloadDto, PromptRowView,
    UpdatePromptDto,
};
