//! # States
//!
//! Every state function of every construct has a name here, so states can
//! be stored, compared and passed around as plain values. [`call`] maps a
//! name back to its function.

use crate::construct;
use crate::message::Message;
use crate::tokenizer::Tokenizer;

/// What a state function wants the tokenizer to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    /// Feed the next code to this state. The current one must be consumed.
    Next(StateName),
    /// Feed the current code, again, to this state.
    Retry(StateName),
    /// The construct matched.
    Ok,
    /// The construct did not match.
    Nok,
    /// An internal fault; tokenizing stops.
    Error(Message),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateName {
    AttentionInside,
    AttentionStart,
    AutolinkEmailAtSignOrDot,
    AutolinkEmailAtext,
    AutolinkEmailLabel,
    AutolinkEmailValue,
    AutolinkEnd,
    AutolinkOpen,
    AutolinkSchemeInsideOrEmailAtext,
    AutolinkSchemeOrEmailAtext,
    AutolinkStart,
    AutolinkUrlInside,
    BlankLineAfter,
    BlankLineStart,
    BlockQuoteContAfter,
    BlockQuoteContBefore,
    BlockQuoteContStart,
    BlockQuoteStart,
    CharacterEscapeInside,
    CharacterEscapeStart,
    CharacterReferenceNumeric,
    CharacterReferenceOpen,
    CharacterReferenceStart,
    CharacterReferenceValue,
    CodeFencedAfter,
    CodeFencedAtNonLazyBreak,
    CodeFencedBeforeContentChunk,
    CodeFencedBeforeSequenceClose,
    CodeFencedCloseStart,
    CodeFencedContentBefore,
    CodeFencedContentChunk,
    CodeFencedContentStart,
    CodeFencedInfo,
    CodeFencedInfoBefore,
    CodeFencedMeta,
    CodeFencedMetaBefore,
    CodeFencedSequenceClose,
    CodeFencedSequenceCloseAfter,
    CodeFencedSequenceOpen,
    CodeFencedStart,
    CodeIndentedAfter,
    CodeIndentedAtBreak,
    CodeIndentedFurtherAfter,
    CodeIndentedFurtherBegin,
    CodeIndentedFurtherStart,
    CodeIndentedInside,
    CodeIndentedStart,
    CodeTextBetween,
    CodeTextData,
    CodeTextSequenceClose,
    CodeTextSequenceOpen,
    CodeTextStart,
    ContentChunkContinue,
    ContentChunkEnd,
    ContentChunkInside,
    ContentChunkStart,
    ContentContinuationAfterEol,
    ContentContinuationPrefixed,
    ContentContinuationStart,
    ContentDefinitionAfter,
    ContentDefinitionBefore,
    ContentDefinitionBeforeConstruct,
    DataAtBreak,
    DataInside,
    DataStart,
    DefinitionAfter,
    DefinitionAfterWhitespace,
    DefinitionDestinationAfter,
    DefinitionDestinationBefore,
    DefinitionDestinationMissing,
    DefinitionLabelAfter,
    DefinitionLabelNok,
    DefinitionMarkerAfter,
    DefinitionStart,
    DefinitionTitleAfter,
    DefinitionTitleAfterOptionalWhitespace,
    DefinitionTitleBefore,
    DefinitionTitleBeforeMarker,
    DefinitionTitleNok,
    DestinationEnclosed,
    DestinationEnclosedBefore,
    DestinationEnclosedEscape,
    DestinationRaw,
    DestinationRawEscape,
    DestinationStart,
    DocumentContainerExistingAfter,
    DocumentContainerExistingBefore,
    DocumentContainerNewAfter,
    DocumentContainerNewBefore,
    DocumentContainerNewConstruct,
    DocumentContainerNewNone,
    DocumentContainerNewPrefix,
    DocumentContainersAfter,
    DocumentFlowEnd,
    DocumentFlowInside,
    DocumentStart,
    FlowAfter,
    FlowBefore,
    FlowBeforeContent,
    FlowBeforeInitial,
    FlowBeforePrefix,
    FlowBlankLineAfter,
    FlowStart,
    GfmFootnoteDefinitionContBlank,
    GfmFootnoteDefinitionContFilled,
    GfmFootnoteDefinitionContStart,
    GfmFootnoteDefinitionLabelAfter,
    GfmFootnoteDefinitionLabelAtMarker,
    GfmFootnoteDefinitionLabelEscape,
    GfmFootnoteDefinitionLabelInside,
    GfmFootnoteDefinitionStart,
    GfmFootnoteDefinitionWhitespaceAfter,
    GfmLabelStartFootnoteOpen,
    GfmLabelStartFootnoteStart,
    GfmTableBodyBreak,
    GfmTableBodyCheckAfterEol,
    GfmTableBodyCheckPrefixed,
    GfmTableBodyCheckStart,
    GfmTableBodyLineStart,
    GfmTableBodyRowPrefix,
    GfmTableBodyRowStart,
    GfmTableDelimiterAfterDivider,
    GfmTableDelimiterAfterWhitespace,
    GfmTableDelimiterCellAfter,
    GfmTableDelimiterCellBefore,
    GfmTableDelimiterDivider,
    GfmTableDelimiterFiller,
    GfmTableDelimiterFillerStart,
    GfmTableDelimiterPrefixed,
    GfmTableDelimiterRowEnd,
    GfmTableDelimiterStart,
    GfmTableDelimiterValueAfter,
    GfmTableEnd,
    GfmTableHeadRowAfter,
    GfmTableRowAfterDivider,
    GfmTableRowAfterWhitespace,
    GfmTableRowCellBefore,
    GfmTableRowCellEscape,
    GfmTableRowCellInside,
    GfmTableRowDivider,
    GfmTableRowEnd,
    GfmTableRowStart,
    GfmTableStart,
    HardBreakEscapeAfter,
    HardBreakEscapeStart,
    HeadingAtxAtBreak,
    HeadingAtxData,
    HeadingAtxSequenceFurther,
    HeadingAtxSequenceOpen,
    HeadingAtxStart,
    HeadingSetextAfter,
    HeadingSetextInside,
    HeadingSetextStart,
    HtmlFlowBasicSelfClosing,
    HtmlFlowBlankLineBefore,
    HtmlFlowCdataOpenInside,
    HtmlFlowCommentOpenInside,
    HtmlFlowCompleteAfter,
    HtmlFlowCompleteAttributeName,
    HtmlFlowCompleteAttributeNameAfter,
    HtmlFlowCompleteAttributeNameBefore,
    HtmlFlowCompleteAttributeValueBefore,
    HtmlFlowCompleteAttributeValueQuoted,
    HtmlFlowCompleteAttributeValueQuotedAfter,
    HtmlFlowCompleteAttributeValueUnquoted,
    HtmlFlowCompleteClosingTagAfter,
    HtmlFlowCompleteEnd,
    HtmlFlowContinuation,
    HtmlFlowContinuationAfter,
    HtmlFlowContinuationBefore,
    HtmlFlowContinuationCdataInside,
    HtmlFlowContinuationClose,
    HtmlFlowContinuationCommentInside,
    HtmlFlowContinuationDeclarationInside,
    HtmlFlowContinuationRawEndTag,
    HtmlFlowContinuationRawTagOpen,
    HtmlFlowContinuationStart,
    HtmlFlowContinuationStartNonLazy,
    HtmlFlowDeclarationOpen,
    HtmlFlowOpen,
    HtmlFlowStart,
    HtmlFlowTagCloseStart,
    HtmlFlowTagName,
    HtmlTextCdata,
    HtmlTextCdataClose,
    HtmlTextCdataEnd,
    HtmlTextCdataOpenInside,
    HtmlTextComment,
    HtmlTextCommentClose,
    HtmlTextCommentEnd,
    HtmlTextCommentOpenInside,
    HtmlTextDeclaration,
    HtmlTextDeclarationOpen,
    HtmlTextEnd,
    HtmlTextInstruction,
    HtmlTextInstructionClose,
    HtmlTextLineEndingAfter,
    HtmlTextLineEndingAfterPrefix,
    HtmlTextLineEndingBefore,
    HtmlTextOpen,
    HtmlTextStart,
    HtmlTextTagClose,
    HtmlTextTagCloseBetween,
    HtmlTextTagCloseStart,
    HtmlTextTagOpen,
    HtmlTextTagOpenAttributeName,
    HtmlTextTagOpenAttributeNameAfter,
    HtmlTextTagOpenAttributeValueBefore,
    HtmlTextTagOpenAttributeValueQuoted,
    HtmlTextTagOpenAttributeValueQuotedAfter,
    HtmlTextTagOpenAttributeValueUnquoted,
    HtmlTextTagOpenBetween,
    LabelAtBreak,
    LabelEndAfter,
    LabelEndNok,
    LabelEndOk,
    LabelEndReferenceCollapsed,
    LabelEndReferenceCollapsedOpen,
    LabelEndReferenceFull,
    LabelEndReferenceFullAfter,
    LabelEndReferenceFullMissing,
    LabelEndReferenceNotFull,
    LabelEndResourceBefore,
    LabelEndResourceBetween,
    LabelEndResourceDestinationAfter,
    LabelEndResourceDestinationMissing,
    LabelEndResourceEnd,
    LabelEndResourceOpen,
    LabelEndResourceStart,
    LabelEndResourceTitleAfter,
    LabelEndStart,
    LabelEscape,
    LabelInside,
    LabelNok,
    LabelStart,
    LabelStartImageAfter,
    LabelStartImageOpen,
    LabelStartImageStart,
    LabelStartLinkStart,
    ListItemAfter,
    ListItemAfterBlank,
    ListItemBefore,
    ListItemBeforeOrdered,
    ListItemBeforeUnordered,
    ListItemContBlank,
    ListItemContFilled,
    ListItemContStart,
    ListItemMarker,
    ListItemMarkerAfter,
    ListItemMarkerAfterFilled,
    ListItemPrefixOther,
    ListItemStart,
    ListItemValue,
    ListItemWhitespace,
    ListItemWhitespaceAfter,
    NonLazyContinuationAfter,
    NonLazyContinuationStart,
    ParagraphInside,
    ParagraphLineStart,
    ParagraphStart,
    SpaceOrTabAfter,
    SpaceOrTabEolAfterEol,
    SpaceOrTabEolAfterFirst,
    SpaceOrTabEolAfterMore,
    SpaceOrTabEolAtEol,
    SpaceOrTabEolStart,
    SpaceOrTabInside,
    SpaceOrTabStart,
    StringBefore,
    StringBeforeData,
    StringStart,
    TextBefore,
    TextBeforeData,
    TextStart,
    ThematicBreakAtBreak,
    ThematicBreakSequence,
    ThematicBreakStart,
    TitleAtBreak,
    TitleBegin,
    TitleEscape,
    TitleInside,
    TitleNok,
    TitleStart,
}

/// Run the state function behind `name`.
pub fn call(tokenizer: &mut Tokenizer, name: StateName) -> State {
    let func: fn(&mut Tokenizer) -> State = match name {
        StateName::AttentionInside => construct::attention::inside,
        StateName::AttentionStart => construct::attention::start,
        StateName::AutolinkEmailAtSignOrDot => construct::autolink::email_at_sign_or_dot,
        StateName::AutolinkEmailAtext => construct::autolink::email_atext,
        StateName::AutolinkEmailLabel => construct::autolink::email_label,
        StateName::AutolinkEmailValue => construct::autolink::email_value,
        StateName::AutolinkEnd => construct::autolink::end,
        StateName::AutolinkOpen => construct::autolink::open,
        StateName::AutolinkSchemeInsideOrEmailAtext => construct::autolink::scheme_inside_or_email_atext,
        StateName::AutolinkSchemeOrEmailAtext => construct::autolink::scheme_or_email_atext,
        StateName::AutolinkStart => construct::autolink::start,
        StateName::AutolinkUrlInside => construct::autolink::url_inside,
        StateName::BlankLineAfter => construct::blank_line::after,
        StateName::BlankLineStart => construct::blank_line::start,
        StateName::BlockQuoteContAfter => construct::block_quote::cont_after,
        StateName::BlockQuoteContBefore => construct::block_quote::cont_before,
        StateName::BlockQuoteContStart => construct::block_quote::cont_start,
        StateName::BlockQuoteStart => construct::block_quote::start,
        StateName::CharacterEscapeInside => construct::character_escape::inside,
        StateName::CharacterEscapeStart => construct::character_escape::start,
        StateName::CharacterReferenceNumeric => construct::character_reference::numeric,
        StateName::CharacterReferenceOpen => construct::character_reference::open,
        StateName::CharacterReferenceStart => construct::character_reference::start,
        StateName::CharacterReferenceValue => construct::character_reference::value,
        StateName::CodeFencedAfter => construct::code_fenced::after,
        StateName::CodeFencedAtNonLazyBreak => construct::code_fenced::at_non_lazy_break,
        StateName::CodeFencedBeforeContentChunk => construct::code_fenced::before_content_chunk,
        StateName::CodeFencedBeforeSequenceClose => construct::code_fenced::before_sequence_close,
        StateName::CodeFencedCloseStart => construct::code_fenced::close_start,
        StateName::CodeFencedContentBefore => construct::code_fenced::content_before,
        StateName::CodeFencedContentChunk => construct::code_fenced::content_chunk,
        StateName::CodeFencedContentStart => construct::code_fenced::content_start,
        StateName::CodeFencedInfo => construct::code_fenced::info,
        StateName::CodeFencedInfoBefore => construct::code_fenced::info_before,
        StateName::CodeFencedMeta => construct::code_fenced::meta,
        StateName::CodeFencedMetaBefore => construct::code_fenced::meta_before,
        StateName::CodeFencedSequenceClose => construct::code_fenced::sequence_close,
        StateName::CodeFencedSequenceCloseAfter => construct::code_fenced::sequence_close_after,
        StateName::CodeFencedSequenceOpen => construct::code_fenced::sequence_open,
        StateName::CodeFencedStart => construct::code_fenced::start,
        StateName::CodeIndentedAfter => construct::code_indented::after,
        StateName::CodeIndentedAtBreak => construct::code_indented::at_break,
        StateName::CodeIndentedFurtherAfter => construct::code_indented::further_after,
        StateName::CodeIndentedFurtherBegin => construct::code_indented::further_begin,
        StateName::CodeIndentedFurtherStart => construct::code_indented::further_start,
        StateName::CodeIndentedInside => construct::code_indented::inside,
        StateName::CodeIndentedStart => construct::code_indented::start,
        StateName::CodeTextBetween => construct::code_text::between,
        StateName::CodeTextData => construct::code_text::data,
        StateName::CodeTextSequenceClose => construct::code_text::sequence_close,
        StateName::CodeTextSequenceOpen => construct::code_text::sequence_open,
        StateName::CodeTextStart => construct::code_text::start,
        StateName::ContentChunkContinue => construct::content::chunk_continue,
        StateName::ContentChunkEnd => construct::content::chunk_end,
        StateName::ContentChunkInside => construct::content::chunk_inside,
        StateName::ContentChunkStart => construct::content::chunk_start,
        StateName::ContentContinuationAfterEol => construct::content::continuation_after_eol,
        StateName::ContentContinuationPrefixed => construct::content::continuation_prefixed,
        StateName::ContentContinuationStart => construct::content::continuation_start,
        StateName::ContentDefinitionAfter => construct::content::definition_after,
        StateName::ContentDefinitionBefore => construct::content::definition_before,
        StateName::ContentDefinitionBeforeConstruct => construct::content::definition_before_construct,
        StateName::DataAtBreak => construct::partial_data::at_break,
        StateName::DataInside => construct::partial_data::inside,
        StateName::DataStart => construct::partial_data::start,
        StateName::DefinitionAfter => construct::definition::after,
        StateName::DefinitionAfterWhitespace => construct::definition::after_whitespace,
        StateName::DefinitionDestinationAfter => construct::definition::destination_after,
        StateName::DefinitionDestinationBefore => construct::definition::destination_before,
        StateName::DefinitionDestinationMissing => construct::definition::destination_missing,
        StateName::DefinitionLabelAfter => construct::definition::label_after,
        StateName::DefinitionLabelNok => construct::definition::label_nok,
        StateName::DefinitionMarkerAfter => construct::definition::marker_after,
        StateName::DefinitionStart => construct::definition::start,
        StateName::DefinitionTitleAfter => construct::definition::title_after,
        StateName::DefinitionTitleAfterOptionalWhitespace => construct::definition::title_after_optional_whitespace,
        StateName::DefinitionTitleBefore => construct::definition::title_before,
        StateName::DefinitionTitleBeforeMarker => construct::definition::title_before_marker,
        StateName::DefinitionTitleNok => construct::definition::title_nok,
        StateName::DestinationEnclosed => construct::partial_destination::enclosed,
        StateName::DestinationEnclosedBefore => construct::partial_destination::enclosed_before,
        StateName::DestinationEnclosedEscape => construct::partial_destination::enclosed_escape,
        StateName::DestinationRaw => construct::partial_destination::raw,
        StateName::DestinationRawEscape => construct::partial_destination::raw_escape,
        StateName::DestinationStart => construct::partial_destination::start,
        StateName::DocumentContainerExistingAfter => construct::document::container_existing_after,
        StateName::DocumentContainerExistingBefore => construct::document::container_existing_before,
        StateName::DocumentContainerNewAfter => construct::document::container_new_after,
        StateName::DocumentContainerNewBefore => construct::document::container_new_before,
        StateName::DocumentContainerNewConstruct => construct::document::container_new_construct,
        StateName::DocumentContainerNewNone => construct::document::container_new_none,
        StateName::DocumentContainerNewPrefix => construct::document::container_new_prefix,
        StateName::DocumentContainersAfter => construct::document::containers_after,
        StateName::DocumentFlowEnd => construct::document::flow_end,
        StateName::DocumentFlowInside => construct::document::flow_inside,
        StateName::DocumentStart => construct::document::start,
        StateName::FlowAfter => construct::flow::after,
        StateName::FlowBefore => construct::flow::before,
        StateName::FlowBeforeContent => construct::flow::before_content,
        StateName::FlowBeforeInitial => construct::flow::before_initial,
        StateName::FlowBeforePrefix => construct::flow::before_prefix,
        StateName::FlowBlankLineAfter => construct::flow::blank_line_after,
        StateName::FlowStart => construct::flow::start,
        StateName::GfmFootnoteDefinitionContBlank => construct::gfm_footnote_definition::cont_blank,
        StateName::GfmFootnoteDefinitionContFilled => construct::gfm_footnote_definition::cont_filled,
        StateName::GfmFootnoteDefinitionContStart => construct::gfm_footnote_definition::cont_start,
        StateName::GfmFootnoteDefinitionLabelAfter => construct::gfm_footnote_definition::label_after,
        StateName::GfmFootnoteDefinitionLabelAtMarker => construct::gfm_footnote_definition::label_at_marker,
        StateName::GfmFootnoteDefinitionLabelEscape => construct::gfm_footnote_definition::label_escape,
        StateName::GfmFootnoteDefinitionLabelInside => construct::gfm_footnote_definition::label_inside,
        StateName::GfmFootnoteDefinitionStart => construct::gfm_footnote_definition::start,
        StateName::GfmFootnoteDefinitionWhitespaceAfter => construct::gfm_footnote_definition::whitespace_after,
        StateName::GfmLabelStartFootnoteOpen => construct::gfm_label_start_footnote::open,
        StateName::GfmLabelStartFootnoteStart => construct::gfm_label_start_footnote::start,
        StateName::GfmTableBodyBreak => construct::gfm_table::body_break,
        StateName::GfmTableBodyCheckAfterEol => construct::gfm_table::body_check_after_eol,
        StateName::GfmTableBodyCheckPrefixed => construct::gfm_table::body_check_prefixed,
        StateName::GfmTableBodyCheckStart => construct::gfm_table::body_check_start,
        StateName::GfmTableBodyLineStart => construct::gfm_table::body_line_start,
        StateName::GfmTableBodyRowPrefix => construct::gfm_table::body_row_prefix,
        StateName::GfmTableBodyRowStart => construct::gfm_table::body_row_start,
        StateName::GfmTableDelimiterAfterDivider => construct::gfm_table::delimiter_after_divider,
        StateName::GfmTableDelimiterAfterWhitespace => construct::gfm_table::delimiter_after_whitespace,
        StateName::GfmTableDelimiterCellAfter => construct::gfm_table::delimiter_cell_after,
        StateName::GfmTableDelimiterCellBefore => construct::gfm_table::delimiter_cell_before,
        StateName::GfmTableDelimiterDivider => construct::gfm_table::delimiter_divider,
        StateName::GfmTableDelimiterFiller => construct::gfm_table::delimiter_filler,
        StateName::GfmTableDelimiterFillerStart => construct::gfm_table::delimiter_filler_start,
        StateName::GfmTableDelimiterPrefixed => construct::gfm_table::delimiter_prefixed,
        StateName::GfmTableDelimiterRowEnd => construct::gfm_table::delimiter_row_end,
        StateName::GfmTableDelimiterStart => construct::gfm_table::delimiter_start,
        StateName::GfmTableDelimiterValueAfter => construct::gfm_table::delimiter_value_after,
        StateName::GfmTableEnd => construct::gfm_table::end,
        StateName::GfmTableHeadRowAfter => construct::gfm_table::head_row_after,
        StateName::GfmTableRowAfterDivider => construct::gfm_table::row_after_divider,
        StateName::GfmTableRowAfterWhitespace => construct::gfm_table::row_after_whitespace,
        StateName::GfmTableRowCellBefore => construct::gfm_table::row_cell_before,
        StateName::GfmTableRowCellEscape => construct::gfm_table::row_cell_escape,
        StateName::GfmTableRowCellInside => construct::gfm_table::row_cell_inside,
        StateName::GfmTableRowDivider => construct::gfm_table::row_divider,
        StateName::GfmTableRowEnd => construct::gfm_table::row_end,
        StateName::GfmTableRowStart => construct::gfm_table::row_start,
        StateName::GfmTableStart => construct::gfm_table::start,
        StateName::HardBreakEscapeAfter => construct::hard_break_escape::after,
        StateName::HardBreakEscapeStart => construct::hard_break_escape::start,
        StateName::HeadingAtxAtBreak => construct::heading_atx::at_break,
        StateName::HeadingAtxData => construct::heading_atx::data,
        StateName::HeadingAtxSequenceFurther => construct::heading_atx::sequence_further,
        StateName::HeadingAtxSequenceOpen => construct::heading_atx::sequence_open,
        StateName::HeadingAtxStart => construct::heading_atx::start,
        StateName::HeadingSetextAfter => construct::heading_setext::after,
        StateName::HeadingSetextInside => construct::heading_setext::inside,
        StateName::HeadingSetextStart => construct::heading_setext::start,
        StateName::HtmlFlowBasicSelfClosing => construct::html_flow::basic_self_closing,
        StateName::HtmlFlowBlankLineBefore => construct::html_flow::blank_line_before,
        StateName::HtmlFlowCdataOpenInside => construct::html_flow::cdata_open_inside,
        StateName::HtmlFlowCommentOpenInside => construct::html_flow::comment_open_inside,
        StateName::HtmlFlowCompleteAfter => construct::html_flow::complete_after,
        StateName::HtmlFlowCompleteAttributeName => construct::html_flow::complete_attribute_name,
        StateName::HtmlFlowCompleteAttributeNameAfter => construct::html_flow::complete_attribute_name_after,
        StateName::HtmlFlowCompleteAttributeNameBefore => construct::html_flow::complete_attribute_name_before,
        StateName::HtmlFlowCompleteAttributeValueBefore => construct::html_flow::complete_attribute_value_before,
        StateName::HtmlFlowCompleteAttributeValueQuoted => construct::html_flow::complete_attribute_value_quoted,
        StateName::HtmlFlowCompleteAttributeValueQuotedAfter => construct::html_flow::complete_attribute_value_quoted_after,
        StateName::HtmlFlowCompleteAttributeValueUnquoted => construct::html_flow::complete_attribute_value_unquoted,
        StateName::HtmlFlowCompleteClosingTagAfter => construct::html_flow::complete_closing_tag_after,
        StateName::HtmlFlowCompleteEnd => construct::html_flow::complete_end,
        StateName::HtmlFlowContinuation => construct::html_flow::continuation,
        StateName::HtmlFlowContinuationAfter => construct::html_flow::continuation_after,
        StateName::HtmlFlowContinuationBefore => construct::html_flow::continuation_before,
        StateName::HtmlFlowContinuationCdataInside => construct::html_flow::continuation_cdata_inside,
        StateName::HtmlFlowContinuationClose => construct::html_flow::continuation_close,
        StateName::HtmlFlowContinuationCommentInside => construct::html_flow::continuation_comment_inside,
        StateName::HtmlFlowContinuationDeclarationInside => construct::html_flow::continuation_declaration_inside,
        StateName::HtmlFlowContinuationRawEndTag => construct::html_flow::continuation_raw_end_tag,
        StateName::HtmlFlowContinuationRawTagOpen => construct::html_flow::continuation_raw_tag_open,
        StateName::HtmlFlowContinuationStart => construct::html_flow::continuation_start,
        StateName::HtmlFlowContinuationStartNonLazy => construct::html_flow::continuation_start_non_lazy,
        StateName::HtmlFlowDeclarationOpen => construct::html_flow::declaration_open,
        StateName::HtmlFlowOpen => construct::html_flow::open,
        StateName::HtmlFlowStart => construct::html_flow::start,
        StateName::HtmlFlowTagCloseStart => construct::html_flow::tag_close_start,
        StateName::HtmlFlowTagName => construct::html_flow::tag_name,
        StateName::HtmlTextCdata => construct::html_text::cdata,
        StateName::HtmlTextCdataClose => construct::html_text::cdata_close,
        StateName::HtmlTextCdataEnd => construct::html_text::cdata_end,
        StateName::HtmlTextCdataOpenInside => construct::html_text::cdata_open_inside,
        StateName::HtmlTextComment => construct::html_text::comment,
        StateName::HtmlTextCommentClose => construct::html_text::comment_close,
        StateName::HtmlTextCommentEnd => construct::html_text::comment_end,
        StateName::HtmlTextCommentOpenInside => construct::html_text::comment_open_inside,
        StateName::HtmlTextDeclaration => construct::html_text::declaration,
        StateName::HtmlTextDeclarationOpen => construct::html_text::declaration_open,
        StateName::HtmlTextEnd => construct::html_text::end,
        StateName::HtmlTextInstruction => construct::html_text::instruction,
        StateName::HtmlTextInstructionClose => construct::html_text::instruction_close,
        StateName::HtmlTextLineEndingAfter => construct::html_text::line_ending_after,
        StateName::HtmlTextLineEndingAfterPrefix => construct::html_text::line_ending_after_prefix,
        StateName::HtmlTextLineEndingBefore => construct::html_text::line_ending_before,
        StateName::HtmlTextOpen => construct::html_text::open,
        StateName::HtmlTextStart => construct::html_text::start,
        StateName::HtmlTextTagClose => construct::html_text::tag_close,
        StateName::HtmlTextTagCloseBetween => construct::html_text::tag_close_between,
        StateName::HtmlTextTagCloseStart => construct::html_text::tag_close_start,
        StateName::HtmlTextTagOpen => construct::html_text::tag_open,
        StateName::HtmlTextTagOpenAttributeName => construct::html_text::tag_open_attribute_name,
        StateName::HtmlTextTagOpenAttributeNameAfter => construct::html_text::tag_open_attribute_name_after,
        StateName::HtmlTextTagOpenAttributeValueBefore => construct::html_text::tag_open_attribute_value_before,
        StateName::HtmlTextTagOpenAttributeValueQuoted => construct::html_text::tag_open_attribute_value_quoted,
        StateName::HtmlTextTagOpenAttributeValueQuotedAfter => construct::html_text::tag_open_attribute_value_quoted_after,
        StateName::HtmlTextTagOpenAttributeValueUnquoted => construct::html_text::tag_open_attribute_value_unquoted,
        StateName::HtmlTextTagOpenBetween => construct::html_text::tag_open_between,
        StateName::LabelAtBreak => construct::partial_label::at_break,
        StateName::LabelEndAfter => construct::label_end::after,
        StateName::LabelEndNok => construct::label_end::nok,
        StateName::LabelEndOk => construct::label_end::ok,
        StateName::LabelEndReferenceCollapsed => construct::label_end::reference_collapsed,
        StateName::LabelEndReferenceCollapsedOpen => construct::label_end::reference_collapsed_open,
        StateName::LabelEndReferenceFull => construct::label_end::reference_full,
        StateName::LabelEndReferenceFullAfter => construct::label_end::reference_full_after,
        StateName::LabelEndReferenceFullMissing => construct::label_end::reference_full_missing,
        StateName::LabelEndReferenceNotFull => construct::label_end::reference_not_full,
        StateName::LabelEndResourceBefore => construct::label_end::resource_before,
        StateName::LabelEndResourceBetween => construct::label_end::resource_between,
        StateName::LabelEndResourceDestinationAfter => construct::label_end::resource_destination_after,
        StateName::LabelEndResourceDestinationMissing => construct::label_end::resource_destination_missing,
        StateName::LabelEndResourceEnd => construct::label_end::resource_end,
        StateName::LabelEndResourceOpen => construct::label_end::resource_open,
        StateName::LabelEndResourceStart => construct::label_end::resource_start,
        StateName::LabelEndResourceTitleAfter => construct::label_end::resource_title_after,
        StateName::LabelEndStart => construct::label_end::start,
        StateName::LabelEscape => construct::partial_label::escape,
        StateName::LabelInside => construct::partial_label::inside,
        StateName::LabelNok => construct::partial_label::nok,
        StateName::LabelStart => construct::partial_label::start,
        StateName::LabelStartImageAfter => construct::label_start_image::after,
        StateName::LabelStartImageOpen => construct::label_start_image::open,
        StateName::LabelStartImageStart => construct::label_start_image::start,
        StateName::LabelStartLinkStart => construct::label_start_link::start,
        StateName::ListItemAfter => construct::list_item::after,
        StateName::ListItemAfterBlank => construct::list_item::after_blank,
        StateName::ListItemBefore => construct::list_item::before,
        StateName::ListItemBeforeOrdered => construct::list_item::before_ordered,
        StateName::ListItemBeforeUnordered => construct::list_item::before_unordered,
        StateName::ListItemContBlank => construct::list_item::cont_blank,
        StateName::ListItemContFilled => construct::list_item::cont_filled,
        StateName::ListItemContStart => construct::list_item::cont_start,
        StateName::ListItemMarker => construct::list_item::marker,
        StateName::ListItemMarkerAfter => construct::list_item::marker_after,
        StateName::ListItemMarkerAfterFilled => construct::list_item::marker_after_filled,
        StateName::ListItemPrefixOther => construct::list_item::prefix_other,
        StateName::ListItemStart => construct::list_item::start,
        StateName::ListItemValue => construct::list_item::value,
        StateName::ListItemWhitespace => construct::list_item::whitespace,
        StateName::ListItemWhitespaceAfter => construct::list_item::whitespace_after,
        StateName::NonLazyContinuationAfter => construct::flow::non_lazy_continuation_after,
        StateName::NonLazyContinuationStart => construct::flow::non_lazy_continuation_start,
        StateName::ParagraphInside => construct::content::paragraph_inside,
        StateName::ParagraphLineStart => construct::content::paragraph_line_start,
        StateName::ParagraphStart => construct::content::paragraph_start,
        StateName::SpaceOrTabAfter => construct::partial_space_or_tab::after,
        StateName::SpaceOrTabEolAfterEol => construct::partial_space_or_tab_eol::after_eol,
        StateName::SpaceOrTabEolAfterFirst => construct::partial_space_or_tab_eol::after_first,
        StateName::SpaceOrTabEolAfterMore => construct::partial_space_or_tab_eol::after_more,
        StateName::SpaceOrTabEolAtEol => construct::partial_space_or_tab_eol::at_eol,
        StateName::SpaceOrTabEolStart => construct::partial_space_or_tab_eol::start,
        StateName::SpaceOrTabInside => construct::partial_space_or_tab::inside,
        StateName::SpaceOrTabStart => construct::partial_space_or_tab::start,
        StateName::StringBefore => construct::string::before,
        StateName::StringBeforeData => construct::string::before_data,
        StateName::StringStart => construct::string::start,
        StateName::TextBefore => construct::text::before,
        StateName::TextBeforeData => construct::text::before_data,
        StateName::TextStart => construct::text::start,
        StateName::ThematicBreakAtBreak => construct::thematic_break::at_break,
        StateName::ThematicBreakSequence => construct::thematic_break::sequence,
        StateName::ThematicBreakStart => construct::thematic_break::start,
        StateName::TitleAtBreak => construct::partial_title::at_break,
        StateName::TitleBegin => construct::partial_title::begin,
        StateName::TitleEscape => construct::partial_title::escape,
        StateName::TitleInside => construct::partial_title::inside,
        StateName::TitleNok => construct::partial_title::nok,
        StateName::TitleStart => construct::partial_title::start,
    };

    func(tokenizer)
}
