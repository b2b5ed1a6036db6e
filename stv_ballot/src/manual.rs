/*!

This is the long-form manual for `stv_ballot` and `stvbooth`.

## Candidate descriptors

Each question of an election lists its candidates as strings, in a fixed order.
The position of a candidate in that list is its index; the booth shows it
1-based and writes it 1-based to the answer field.

* `Alice`: a candidate on its own.
* `Bob/PartyX/2`: a candidate in the group voting ticket `PartyX`, with order `2`
  inside the ticket.

A ticket is shown as one block placed where its first member appears in the
list. Members are listed by decreasing order: `Bob/PartyX/2` comes before
`Carol/PartyX/1`. A member whose order is not a number is listed after the
numbered members. Descriptors with only two fields (`Bob/PartyX`) are plain
candidates named after the first field.

When the election asks for it (`randomize_answer_order`), the blocks and
candidates of the available list are shuffled. Members of a block keep their
order.

## Moving candidates

| Action | Effect |
|--------|--------|
| Drop a block in the available or chosen list | The block moves with its members |
| Take a candidate out of its block | Its label becomes `2 - Bob (PartyX)`; an emptied block disappears |
| Drop a candidate in a block of its own ticket | Its label goes back to `2 - Bob` |
| Drop any other candidate in a block | The block is broken up: its members take its place, each labelled with its ticket |
| Drop a block in a block | Refused |

## Answer field

The chosen list, read from top to bottom and through the blocks it contains,
gives the candidate indices joined by commas:

```text
2,3,1
```

Nothing chosen gives the empty string.

## Election file

`stvbooth` reads election definitions in JSON:

```json
{
  "name": "Board election",
  "questions": [
    {"question": "Board members", "short_name": "board",
     "answers": ["Alice", "Bob/PartyX/2", "Carol/PartyX/1"]}
  ],
  "metadata": {"randomize_answer_order": false}
}
```

Other keys are accepted and ignored.

## Script file

The voter's actions are replayed from a script:

```json
{"steps": [
  {"action": "show", "question": 0},
  {"action": "drag", "item": "gvt:PartyX", "to": "chosen"},
  {"action": "drag", "item": "Alice", "to": "gvt:PartyX", "position": 1},
  {"action": "cancel", "item": "#2"}
]}
```

Items are named `#<n>` (candidate with index `n` as shown on the ballot),
`gvt:<name>` (a block) or by candidate name. Lists are `available`, `chosen`
or `gvt:<name>`. Without a `position` the item goes to the end of the list.

 */
